//! Persistence port for the betting pool.
//!
//! [`PoolStore`] hands out a [`Repository`] scoped to one transaction. If the
//! closure returns `Ok`, every write it made is committed; if it returns
//! `Err`, every write is discarded and the error is passed through unchanged.

use crate::domain::{Bet, BetId, Bettor, Competitor, NewBet, Race};
use crate::error::Result;

/// Transactional access to the pool's records.
pub trait PoolStore: Send + Sync {
    /// Run `f` inside a single transaction.
    ///
    /// # Errors
    /// Returns the closure's error after rolling back, or a store error if the
    /// transaction could not be opened or committed.
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>;
}

/// Record-level operations available inside a transaction.
///
/// Lookups by name are exact matches. Cascading deletes are performed by the
/// repository itself.
pub trait Repository {
    /// Get a race with its competitors in insertion order.
    fn find_race(&mut self, name: &str) -> Result<Option<Race>>;

    /// All races sorted by name, each with its competitors.
    fn list_races(&mut self) -> Result<Vec<Race>>;

    /// Insert the race row. Competitors are inserted separately.
    fn insert_race(&mut self, race: &Race) -> Result<()>;

    /// Persist `open` and `house_profit`.
    fn update_race(&mut self, race: &Race) -> Result<()>;

    /// Delete a race with its competitors and bets. Returns whether it existed.
    fn delete_race(&mut self, name: &str) -> Result<bool>;

    /// Look a competitor up by its pool-wide unique name.
    fn find_competitor(&mut self, name: &str) -> Result<Option<Competitor>>;

    /// Append a competitor to its race.
    fn insert_competitor(&mut self, competitor: &Competitor) -> Result<()>;

    /// Overwrite the competitor currently named `current_name`, keeping its
    /// position. Bets on it follow a rename.
    fn update_competitor(&mut self, current_name: &str, competitor: &Competitor) -> Result<()>;

    /// Delete a competitor of a race with its bets. Returns whether it existed.
    fn delete_competitor(&mut self, race: &str, name: &str) -> Result<bool>;

    fn find_bettor(&mut self, name: &str) -> Result<Option<Bettor>>;

    /// All bettors sorted by name.
    fn list_bettors(&mut self) -> Result<Vec<Bettor>>;

    fn insert_bettor(&mut self, bettor: &Bettor) -> Result<()>;

    /// Rename a bettor and the bets referencing it. Returns whether it existed.
    fn rename_bettor(&mut self, current_name: &str, new_name: &str) -> Result<bool>;

    /// Delete a bettor with its bets. Returns whether it existed.
    fn delete_bettor(&mut self, name: &str) -> Result<bool>;

    /// Store a bet with a zero payout and return it with its new id.
    fn insert_bet(&mut self, bet: NewBet) -> Result<Bet>;

    /// Bets of a race sorted by bettor name, ties in insertion order.
    fn race_bets(&mut self, race: &str) -> Result<Vec<Bet>>;

    /// Overwrite amount, payout and references of the bet with `bet.id`.
    fn update_bet(&mut self, bet: &Bet) -> Result<()>;

    fn delete_bet(&mut self, id: BetId) -> Result<bool>;
}
