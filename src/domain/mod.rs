//! Pool domain: records, invariants and the payout algorithm.
//!
//! Nothing in here knows about storage or presentation.

pub mod bet;
pub mod competitor;
pub mod error;
pub mod name;
pub mod payout;
pub mod probability;
pub mod race;
pub mod view;

pub use bet::{Bet, BetId, Bettor, NewBet};
pub use competitor::Competitor;
pub use error::DomainError;
pub use payout::{PayoutEntry, WinningsReport};
pub use probability::Probability;
pub use race::Race;
pub use view::{BetView, BettorView, CompetitorView, RaceView};
