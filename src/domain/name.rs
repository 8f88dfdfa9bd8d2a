//! Name rules for races, competitors and bettors.
//!
//! Every entity in the pool is keyed by its name, so these checks are the
//! first line of every create operation. Uniqueness is not checked here; it
//! needs the store.

use super::error::DomainError;

/// Maximum number of characters in any entity name.
pub const MAX_NAME_LEN: usize = 200;

/// Validate a race name and return its trimmed form.
///
/// # Errors
/// Returns [`DomainError::EmptyRaceName`] or [`DomainError::RaceNameTooLong`].
pub fn race_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::EmptyRaceName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::RaceNameTooLong { max: MAX_NAME_LEN });
    }
    Ok(name.to_string())
}

/// Validate a competitor name.
///
/// Blankness is judged on the trimmed name but the name is stored as given.
///
/// # Errors
/// Returns [`DomainError::EmptyCompetitorName`] or
/// [`DomainError::CompetitorNameTooLong`].
pub fn competitor_name(raw: &str) -> Result<&str, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::EmptyCompetitorName);
    }
    if raw.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::CompetitorNameTooLong { max: MAX_NAME_LEN });
    }
    Ok(raw)
}

/// Validate a bettor name (1 to 200 characters, taken verbatim).
///
/// # Errors
/// Returns [`DomainError::InvalidBettorName`].
pub fn bettor_name(raw: &str) -> Result<&str, DomainError> {
    let len = raw.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(DomainError::InvalidBettorName { max: MAX_NAME_LEN });
    }
    Ok(raw)
}
