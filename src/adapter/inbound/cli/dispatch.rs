//! Routes a parsed command to its handler.

use std::process::ExitCode;

use crate::adapter::inbound::cli::command::Commands;
use crate::adapter::inbound::cli::{bet, bettor, race};
use crate::application::pool::BettingPool;
use crate::error::Result;
use crate::port::outbound::store::PoolStore;

/// Execute `command` against `pool`.
///
/// Returns a failing exit code for non-exceptional refusals (a blocked race
/// deletion, a rejected bet edit) and an error for everything else.
///
/// # Errors
/// Whatever the pool operation returns.
pub fn execute<S: PoolStore>(pool: &BettingPool<S>, command: &Commands) -> Result<ExitCode> {
    match command {
        Commands::Race(command) => race::execute(pool, command),
        Commands::Bettor(command) => bettor::execute(pool, command),
        Commands::Bet(command) => bet::execute(pool, command),
    }
}
