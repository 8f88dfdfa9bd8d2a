//! E-Porra - parimutuel betting pool manager.
//!
//! Organizers register races with competitors and win probabilities, bettors
//! place wagers on competitors, and once a winner is declared the race closes
//! and payouts are computed from the winner's implied odds. The house keeps
//! whatever was wagered and not paid out.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Records, name and probability rules, the payout algorithm
//! - [`port`] - The transactional [`PoolStore`](port::PoolStore) trait
//! - [`application`] - [`BettingPool`](application::pool::BettingPool), the
//!   single entry point for every mutation and report
//! - [`adapter`] - In-memory and SQLite stores, the `eporra` command line
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Shared fixtures for integration tests
//!
//! # Example
//!
//! ```
//! use eporra::adapter::outbound::memory::MemoryStore;
//! use eporra::application::pool::{BettingPool, CompetitorChange};
//! use rust_decimal_macros::dec;
//!
//! let pool = BettingPool::new(MemoryStore::new());
//! pool.save_race(
//!     "Derby",
//!     &[
//!         CompetitorChange::new("Bolt", dec!(0.25)),
//!         CompetitorChange::new("Flash", dec!(0.75)),
//!     ],
//!     true,
//! )?;
//! assert_eq!(pool.races()?.len(), 1);
//! # Ok::<(), eporra::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
