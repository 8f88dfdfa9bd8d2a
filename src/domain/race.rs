//! Races and their open/closed lifecycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::competitor::Competitor;
use super::error::DomainError;

/// A betting event.
///
/// Lifecycle is `open -> closed`; nothing reopens a race. `house_profit` stays
/// `None` until the winnings report has been generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    /// Race name, trimmed.
    pub name: String,
    /// Whether the race still accepts bets.
    pub open: bool,
    /// Total wagered minus total paid out, once settled.
    pub house_profit: Option<Decimal>,
    /// Competitors in insertion order.
    pub competitors: Vec<Competitor>,
}

impl Race {
    /// Create an open race with no competitors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: true,
            house_profit: None,
            competitors: Vec::new(),
        }
    }

    /// Fail unless the race still accepts bets.
    ///
    /// # Errors
    /// Returns [`DomainError::RaceClosed`].
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.open {
            Ok(())
        } else {
            Err(DomainError::RaceClosed {
                race: self.name.clone(),
            })
        }
    }

    /// Close the race.
    ///
    /// # Errors
    /// Returns [`DomainError::RaceAlreadyClosed`] when already settled.
    pub fn close(&mut self) -> Result<(), DomainError> {
        if !self.open {
            return Err(DomainError::RaceAlreadyClosed {
                race: self.name.clone(),
            });
        }
        self.open = false;
        Ok(())
    }

    /// The declared winner, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.winner)
    }
}
