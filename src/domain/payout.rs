//! Pari-mutuel settlement with a house edge.
//!
//! A winning bet returns its stake plus `stake / odds`, where the odds are
//! derived from the winner's implied probability. Losing bets pay nothing.
//! The house keeps whatever was wagered and not paid out.
//!
//! # Example
//!
//! ```
//! use eporra::domain::payout::payout_for;
//! use eporra::domain::probability::Probability;
//! use rust_decimal_macros::dec;
//!
//! let even = Probability::try_new(dec!(0.5)).unwrap();
//! assert_eq!(payout_for(dec!(10), true, even), Ok(dec!(20.00)));
//! assert_eq!(payout_for(dec!(10), false, even), Ok(dec!(0)));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::Bet;
use super::competitor::Competitor;
use super::error::DomainError;
use super::probability::Probability;

/// Decimal places payouts are rounded to.
pub const PAYOUT_SCALE: u32 = 2;

/// Payout of a single stake, at exactly two decimal places. Rounds half to
/// even.
///
/// # Errors
/// Returns [`DomainError::NumericOverflow`] when the payout does not fit in a
/// decimal, e.g. a huge stake on a long shot.
pub fn payout_for(
    amount: Decimal,
    on_winner: bool,
    winner: Probability,
) -> Result<Decimal, DomainError> {
    if !on_winner {
        return Ok(Decimal::ZERO);
    }
    let mut payout = amount
        .checked_div(winner.odds())
        .and_then(|gain| amount.checked_add(gain))
        .ok_or(DomainError::NumericOverflow { quantity: "payout" })?
        .round_dp(PAYOUT_SCALE);
    payout.rescale(PAYOUT_SCALE);
    Ok(payout)
}

/// Sum decimals, failing instead of panicking past [`Decimal::MAX`].
///
/// # Errors
/// Returns [`DomainError::NumericOverflow`] naming `quantity`.
pub fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    quantity: &'static str,
) -> Result<Decimal, DomainError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or(DomainError::NumericOverflow { quantity })
}

/// One line of the winnings report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutEntry {
    pub bettor: String,
    pub payout: Decimal,
}

/// Result of settling every bet of a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinningsReport {
    /// One entry per bet, sorted by bettor name. Ties keep bet order.
    pub entries: Vec<PayoutEntry>,
    /// Total wagered minus total paid out.
    pub house_profit: Decimal,
}

impl WinningsReport {
    /// Total paid out to bettors.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.entries.iter().map(|e| e.payout).sum()
    }
}

/// Assign the payout of every bet and compute the house profit.
///
/// `bets` are mutated in place so the caller can persist them. The house
/// profit uses the stake amounts, which settlement never touches.
///
/// # Errors
/// Returns [`DomainError::NumericOverflow`] when a payout or one of the
/// totals does not fit in a decimal. `bets` may be partly updated then.
pub fn settle(bets: &mut [Bet], winner: &Competitor) -> Result<WinningsReport, DomainError> {
    let mut entries = Vec::with_capacity(bets.len());
    for bet in bets.iter_mut() {
        bet.payout = payout_for(bet.amount, bet.competitor == winner.name, winner.probability)?;
        entries.push(PayoutEntry {
            bettor: bet.bettor.clone(),
            payout: bet.payout,
        });
    }

    let wagered = checked_sum(bets.iter().map(|b| b.amount), "total wagered")?;
    let paid = checked_sum(entries.iter().map(|e| e.payout), "total paid out")?;

    entries.sort_by(|a, b| a.bettor.cmp(&b.bettor));

    Ok(WinningsReport {
        entries,
        house_profit: wagered - paid,
    })
}
