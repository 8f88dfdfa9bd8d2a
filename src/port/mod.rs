//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!        ┌─────────────┐        ┌──────────────┐
//!  CLI ──▶ BettingPool ├────────▶  PoolStore   │
//!        └─────────────┘        └──────┬───────┘
//!                                      │
//!                         ┌────────────┴───────────┐
//!                         ▼                        ▼
//!                   ┌───────────┐           ┌─────────────┐
//!                   │  Memory   │           │   SQLite    │
//!                   └───────────┘           └─────────────┘
//! ```

pub mod outbound;

pub use outbound::store::{PoolStore, Repository};
