//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for change records and other inputs.
//! - [`pool`] - Ready-made pools over either store, optionally seeded.
//! - [`config`] - Canonical configuration files.

pub mod config;
pub mod domain;
pub mod pool;
