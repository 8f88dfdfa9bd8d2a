//! CLI module graph.

pub mod bet;
pub mod bettor;
pub mod command;
pub mod diagnostic;
pub mod dispatch;
pub mod output;
pub mod paths;
pub mod race;
