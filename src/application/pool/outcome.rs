//! Non-exceptional results of pool operations.

use std::fmt;

use serde::Serialize;

/// Result of deleting a race. Being blocked by bets is normal application
/// flow, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceDeletion {
    Deleted,
    /// The race has bets and was kept.
    HasBets,
    NotFound,
}

impl RaceDeletion {
    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// `1` when deleted, `0` otherwise.
    #[must_use]
    pub const fn as_flag(self) -> u8 {
        if self.is_deleted() {
            1
        } else {
            0
        }
    }
}

/// Why a bet edit was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum EditRejection {
    /// Missing amount, or amount not greater than one.
    AmountNotAboveOne,
    /// No bet at that position of the race's bet list.
    PositionOutOfRange(usize),
    /// The edit was attempted and failed; nothing was written.
    Failed(String),
}

impl fmt::Display for EditRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmountNotAboveOne => f.write_str("the value must be a positive number greater than one"),
            Self::PositionOutOfRange(position) => write!(f, "no bet at position {position}"),
            Self::Failed(reason) => f.write_str(reason),
        }
    }
}

/// Result of [`BettingPool::edit_bet`](super::manager::BettingPool::edit_bet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BetEdit {
    Applied,
    Rejected(EditRejection),
}

impl BetEdit {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&EditRejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_flag_matches_outcome() {
        assert_eq!(RaceDeletion::Deleted.as_flag(), 1);
        assert_eq!(RaceDeletion::HasBets.as_flag(), 0);
        assert_eq!(RaceDeletion::NotFound.as_flag(), 0);
    }

    #[test]
    fn rejection_message_for_low_amount() {
        let edit = BetEdit::Rejected(EditRejection::AmountNotAboveOne);
        assert!(!edit.is_applied());
        assert_eq!(
            edit.rejection().map(ToString::to_string).as_deref(),
            Some("the value must be a positive number greater than one")
        );
    }
}
