//! Betting-pool use cases.

pub mod change;
pub mod manager;
pub mod outcome;

pub use change::{ChangeState, CompetitorChange};
pub use manager::BettingPool;
pub use outcome::{BetEdit, EditRejection, RaceDeletion};
