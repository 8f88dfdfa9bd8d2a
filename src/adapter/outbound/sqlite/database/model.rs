//! Database model types for Diesel ORM.
//!
//! Decimals are stored as canonical text so amounts and probabilities survive
//! a round trip exactly.

use diesel::prelude::*;

use super::schema::{bets, bettors, competitors, races};

/// Database row for a race.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = races)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RaceRow {
    pub name: String,
    pub open: bool,
    pub house_profit: Option<String>,
}

/// Database row for a competitor.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = competitors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompetitorRow {
    pub name: String,
    pub race_name: String,
    pub probability: String,
    pub winner: bool,
    pub position: i32,
}

/// Database row for a bettor.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = bettors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BettorRow {
    pub name: String,
}

/// Database row for a bet (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bets)]
pub struct NewBetRow {
    pub amount: String,
    pub payout: String,
    pub bettor_name: String,
    pub race_name: String,
    pub competitor_name: String,
}

/// Database row for a bet (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetRow {
    pub id: i32,
    pub amount: String,
    pub payout: String,
    pub bettor_name: String,
    pub race_name: String,
    pub competitor_name: String,
}
