//! Ready-made pools.

use rust_decimal_macros::dec;

use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::sqlite::store::SqliteStore;
use crate::application::pool::{BettingPool, CompetitorChange};
use crate::error::Result;
use crate::port::outbound::store::PoolStore;

/// Race created by [`seed`].
pub const RACE: &str = "Derby";
/// Competitors of [`RACE`], both at probability 0.5.
pub const FAVOURITE: &str = "Bolt";
pub const OUTSIDER: &str = "Flash";
/// Bettors created by [`seed`].
pub const BETTORS: [&str; 2] = ["Ana", "Bea"];

/// An empty pool over a [`MemoryStore`].
pub fn memory() -> BettingPool<MemoryStore> {
    BettingPool::new(MemoryStore::new())
}

/// An empty pool over an in-memory SQLite database.
///
/// # Panics
/// If the database cannot be opened.
pub fn sqlite_in_memory() -> BettingPool<SqliteStore> {
    BettingPool::new(SqliteStore::open(":memory:").expect("open in-memory sqlite"))
}

/// Add [`RACE`] with [`FAVOURITE`] and [`OUTSIDER`] at even odds, and the
/// two [`BETTORS`]. No bets are placed.
///
/// # Errors
/// Whatever the pool returns.
pub fn seed<S: PoolStore>(pool: &BettingPool<S>) -> Result<()> {
    pool.save_race(
        RACE,
        &[
            CompetitorChange::new(FAVOURITE, dec!(0.5)),
            CompetitorChange::new(OUTSIDER, dec!(0.5)),
        ],
        true,
    )?;
    for bettor in BETTORS {
        pool.add_bettor(bettor)?;
    }
    Ok(())
}
