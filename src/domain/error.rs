//! Domain validation and state errors.
//!
//! This module defines the errors raised when a pool invariant would be
//! violated. The messages are user facing: the presentation layer shows them
//! verbatim.
//!
//! # Examples
//!
//! ```
//! use eporra::domain::error::DomainError;
//! use eporra::domain::probability::Probability;
//! use rust_decimal_macros::dec;
//!
//! let result = Probability::try_new(dec!(1));
//! assert!(matches!(result, Err(DomainError::ProbabilityOutOfRange { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when pool invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Race names cannot be blank once trimmed.
    #[error("the race name must not be empty")]
    EmptyRaceName,

    /// Race names are limited to 200 characters.
    #[error("the race name can have at most {max} characters")]
    RaceNameTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// A race with the same name already exists.
    #[error("a race named {name} already exists")]
    DuplicateRace {
        /// The conflicting name.
        name: String,
    },

    /// Competitor names cannot be blank once trimmed.
    #[error("the competitor name must not be empty")]
    EmptyCompetitorName,

    /// Competitor names are limited to 200 characters.
    #[error("the competitor name can have at most {max} characters")]
    CompetitorNameTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// Competitor names are unique across every race of the pool.
    #[error("a competitor named {name} already exists")]
    DuplicateCompetitor {
        /// The conflicting name.
        name: String,
    },

    /// The probability could not be read as a number.
    #[error("the probability must be a number, got {raw:?}")]
    ProbabilityNotNumeric {
        /// The raw input.
        raw: String,
    },

    /// Probabilities live in the open interval (0, 1).
    #[error("the probability must be greater than 0 and less than 1, got {value}")]
    ProbabilityOutOfRange {
        /// The rejected value.
        value: Decimal,
    },

    /// The competitor set of a race must add up to exactly one.
    #[error("the competitor probabilities add up to {sum}, not 1")]
    ProbabilitiesDoNotSumToOne {
        /// The actual sum.
        sum: Decimal,
    },

    /// A competitor change record could not be parsed.
    #[error("invalid competitor entry {raw:?}, expected NAME=PROBABILITY")]
    MalformedCompetitorChange {
        /// The raw input.
        raw: String,
    },

    /// Bettor names must have between 1 and 200 characters.
    #[error("the bettor name must have between 1 and {max} characters")]
    InvalidBettorName {
        /// Maximum accepted length.
        max: usize,
    },

    /// A bettor with the same name already exists.
    #[error("a bettor with the same name already exists")]
    DuplicateBettor,

    /// Bet amounts must be strictly positive.
    #[error("the bet amount must be positive and greater than zero, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// The race no longer accepts changes.
    #[error("the race {race} has finished, bets can no longer be added")]
    RaceClosed {
        /// The closed race.
        race: String,
    },

    /// The race has already been settled.
    #[error("the race {race} has already been settled")]
    RaceAlreadyClosed {
        /// The closed race.
        race: String,
    },

    /// Settlement needs a winner.
    #[error("a winner must be selected")]
    NoWinnerSelected,

    /// A computed amount does not fit in a decimal.
    #[error("the {quantity} is too large to compute")]
    NumericOverflow {
        /// What was being computed.
        quantity: &'static str,
    },
}
