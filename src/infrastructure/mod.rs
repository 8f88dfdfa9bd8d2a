//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading and wiring the store into the pool.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
