//! Plain mapping views handed to the presentation layer.
//!
//! Field names serialise with the keys the presentation layer has always
//! consumed (`Nombre`, `Abierta`, ...).

use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::{Bet, Bettor};
use super::competitor::Competitor;
use super::race::Race;

/// `{Nombre, Abierta, Ganancia, Competidores}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceView {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Abierta")]
    pub open: bool,
    #[serde(rename = "Ganancia")]
    pub house_profit: Option<Decimal>,
    #[serde(rename = "Competidores")]
    pub competitors: Vec<CompetitorView>,
}

/// `{Nombre, Probabilidad}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitorView {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Probabilidad")]
    pub probability: Decimal,
}

/// `{Nombre}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BettorView {
    #[serde(rename = "Nombre")]
    pub name: String,
}

/// `{Valor, Ganancia, Competidor, Apostador}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetView {
    #[serde(rename = "Valor")]
    pub amount: Decimal,
    #[serde(rename = "Ganancia")]
    pub payout: Decimal,
    #[serde(rename = "Competidor")]
    pub competitor: String,
    #[serde(rename = "Apostador")]
    pub bettor: String,
}

impl From<&Competitor> for CompetitorView {
    fn from(c: &Competitor) -> Self {
        Self {
            name: c.name.clone(),
            probability: c.probability.value(),
        }
    }
}

impl From<&Race> for RaceView {
    fn from(r: &Race) -> Self {
        Self {
            name: r.name.clone(),
            open: r.open,
            house_profit: r.house_profit,
            competitors: r.competitors.iter().map(CompetitorView::from).collect(),
        }
    }
}

impl From<&Bettor> for BettorView {
    fn from(b: &Bettor) -> Self {
        Self {
            name: b.name.clone(),
        }
    }
}

impl From<&Bet> for BetView {
    fn from(b: &Bet) -> Self {
        Self {
            amount: b.amount,
            payout: b.payout,
            competitor: b.competitor.clone(),
            bettor: b.bettor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::probability::Probability;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn race_view_uses_presentation_keys() {
        let mut race = Race::new("Derby");
        race.competitors.push(Competitor::new(
            "Bolt",
            "Derby",
            Probability::try_new(dec!(0.5)).unwrap(),
        ));

        let value = serde_json::to_value(RaceView::from(&race)).unwrap();

        assert_eq!(
            value,
            json!({
                "Nombre": "Derby",
                "Abierta": true,
                "Ganancia": null,
                "Competidores": [{ "Nombre": "Bolt", "Probabilidad": "0.5" }],
            })
        );
    }

    #[test]
    fn bettor_view_has_single_key() {
        let value = serde_json::to_value(BettorView::from(&Bettor::new("Ana"))).unwrap();
        assert_eq!(value, json!({ "Nombre": "Ana" }));
    }
}
