//! Builders for pool inputs used across tests.

use rust_decimal::Decimal;

use crate::application::pool::CompetitorChange;

/// `New` change records from `(name, probability)` pairs.
pub fn changes(entries: &[(&str, Decimal)]) -> Vec<CompetitorChange> {
    entries
        .iter()
        .map(|(name, p)| CompetitorChange::new(*name, *p))
        .collect()
}

/// `n` competitors named `c0`, `c1`, ... sharing a probability of `1/n`.
///
/// `n` must divide one exactly in decimal (1, 2, 4, 5, 8, 10, ...).
pub fn uniform_changes(n: u32) -> Vec<CompetitorChange> {
    let p = Decimal::ONE / Decimal::from(n);
    (0..n)
        .map(|i| CompetitorChange::new(format!("c{i}"), p))
        .collect()
}

/// A name of exactly `len` characters.
pub fn name_of_len(len: usize) -> String {
    "x".repeat(len)
}
