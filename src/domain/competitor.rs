//! Race entrants.

use serde::{Deserialize, Serialize};

use super::probability::Probability;

/// A competitor of one race.
///
/// Keyed by `(name, race)`, but the name alone is unique across the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    /// Competitor name.
    pub name: String,
    /// Name of the owning race.
    pub race: String,
    /// Implied win probability.
    pub probability: Probability,
    /// Set on exactly one competitor when the race is settled.
    pub winner: bool,
}

impl Competitor {
    /// Create a non-winning competitor.
    pub fn new(name: impl Into<String>, race: impl Into<String>, probability: Probability) -> Self {
        Self {
            name: name.into(),
            race: race.into(),
            probability,
            winner: false,
        }
    }
}
