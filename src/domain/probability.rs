//! Win probabilities and the odds derived from them.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Implied win probability, strictly inside (0, 1).
///
/// The inner value is private so every probability in the pool has gone
/// through [`Probability::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Probability(Decimal);

impl Probability {
    /// Validate a probability.
    ///
    /// # Errors
    /// Returns [`DomainError::ProbabilityOutOfRange`] unless `0 < value < 1`.
    pub fn try_new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO || value >= Decimal::ONE {
            return Err(DomainError::ProbabilityOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Parse raw user input. The numeric check runs before the range check.
    ///
    /// # Errors
    /// Returns [`DomainError::ProbabilityNotNumeric`] for non-numeric input,
    /// then whatever [`Probability::try_new`] returns.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = parse_number(raw)?;
        Self::try_new(value)
    }

    /// The probability as a decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Derived odds, `p / (1 - p)`. Always positive.
    #[must_use]
    pub fn odds(self) -> Decimal {
        self.0 / (Decimal::ONE - self.0)
    }
}

/// Read a decimal from user input, accepting scientific notation.
///
/// # Errors
/// Returns [`DomainError::ProbabilityNotNumeric`] when nothing numeric can be read.
pub fn parse_number(raw: &str) -> Result<Decimal, DomainError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DomainError::ProbabilityNotNumeric {
            raw: raw.to_string(),
        })
}

impl TryFrom<Decimal> for Probability {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Probability> for Decimal {
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_open_interval_only() {
        assert!(Probability::try_new(dec!(0.5)).is_ok());
        assert!(Probability::try_new(dec!(0.0001)).is_ok());
        assert!(Probability::try_new(dec!(0.9999)).is_ok());

        for bad in [dec!(0), dec!(1), dec!(-0.2), dec!(1.5)] {
            assert_eq!(
                Probability::try_new(bad),
                Err(DomainError::ProbabilityOutOfRange { value: bad })
            );
        }
    }

    #[test]
    fn parse_checks_type_before_range() {
        assert!(matches!(
            Probability::parse("abc"),
            Err(DomainError::ProbabilityNotNumeric { .. })
        ));
        assert!(matches!(
            Probability::parse("1"),
            Err(DomainError::ProbabilityOutOfRange { .. })
        ));
        assert_eq!(Probability::parse(" 0.25 ").unwrap().value(), dec!(0.25));
    }

    #[test]
    fn parse_accepts_scientific_notation() {
        assert_eq!(Probability::parse("2.5e-1").unwrap().value(), dec!(0.25));
    }

    #[test]
    fn even_money_odds_are_one() {
        let p = Probability::try_new(dec!(0.5)).unwrap();
        assert_eq!(p.odds(), dec!(1));
    }

    #[test]
    fn odds_of_long_shot() {
        let p = Probability::try_new(dec!(0.2)).unwrap();
        assert_eq!(p.odds(), dec!(0.25));
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        let ok: Probability = serde_json::from_str("\"0.3\"").unwrap();
        assert_eq!(ok.value(), dec!(0.3));
        assert!(serde_json::from_str::<Probability>("\"1.0\"").is_err());
    }
}
