//! Wagers and bettors.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Surrogate identifier of a stored bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BetId(i32);

impl BetId {
    /// Wrap a raw row id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw row id.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant who places wagers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bettor {
    /// Unique bettor name.
    pub name: String,
}

impl Bettor {
    /// Create a bettor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A bet that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBet {
    pub amount: Decimal,
    pub bettor: String,
    pub race: String,
    pub competitor: String,
}

impl NewBet {
    /// Build a bet request, rejecting non-positive amounts.
    ///
    /// # Errors
    /// Returns [`DomainError::NonPositiveAmount`] when `amount <= 0`.
    pub fn try_new(
        bettor: impl Into<String>,
        race: impl Into<String>,
        amount: Decimal,
        competitor: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }
        Ok(Self {
            amount,
            bettor: bettor.into(),
            race: race.into(),
            competitor: competitor.into(),
        })
    }
}

/// A stored wager of a bettor on a competitor of a race.
///
/// References are held by name, the same way they are keyed in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub amount: Decimal,
    /// Zero until the winnings report assigns it.
    pub payout: Decimal,
    pub bettor: String,
    pub race: String,
    pub competitor: String,
}

impl Bet {
    /// Materialise a stored bet from its request.
    #[must_use]
    pub fn from_new(id: BetId, bet: NewBet) -> Self {
        Self {
            id,
            amount: bet.amount,
            payout: Decimal::ZERO,
            bettor: bet.bettor,
            race: bet.race,
            competitor: bet.competitor,
        }
    }
}
