//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed [`PoolStore`](crate::port::PoolStore) using
//! Diesel ORM.

pub mod database;
pub mod store;
