//! Competitor change records submitted with a race.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::probability::parse_number;

/// Whether a change record adds a competitor or edits the one at its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeState {
    #[default]
    New,
    Existing,
}

/// `{name, probability, state}` as submitted by the presentation layer.
///
/// The probability is kept raw: the range check belongs to the competitor
/// rules, after the sum of the whole set has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorChange {
    pub name: String,
    pub probability: Decimal,
    #[serde(default)]
    pub state: ChangeState,
}

impl CompetitorChange {
    /// A record that adds a competitor.
    pub fn new(name: impl Into<String>, probability: Decimal) -> Self {
        Self {
            name: name.into(),
            probability,
            state: ChangeState::New,
        }
    }

    /// A record that edits the competitor at the same position.
    pub fn existing(name: impl Into<String>, probability: Decimal) -> Self {
        Self {
            name: name.into(),
            probability,
            state: ChangeState::Existing,
        }
    }
}

const EXISTING_PREFIX: &str = "existing:";

/// Parses `NAME=PROBABILITY` or `existing:NAME=PROBABILITY`.
impl FromStr for CompetitorChange {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (state, body) = match raw.strip_prefix(EXISTING_PREFIX) {
            Some(rest) => (ChangeState::Existing, rest),
            None => (ChangeState::New, raw),
        };
        let (name, probability) =
            body.rsplit_once('=')
                .ok_or_else(|| DomainError::MalformedCompetitorChange {
                    raw: raw.to_string(),
                })?;

        Ok(Self {
            name: name.to_string(),
            probability: parse_number(probability)?,
            state,
        })
    }
}
