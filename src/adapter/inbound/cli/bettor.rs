//! Handlers for `eporra bettor ...`.

use std::process::ExitCode;

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::BettorCommand;
use crate::adapter::inbound::cli::output;
use crate::application::pool::BettingPool;
use crate::error::Result;
use crate::port::outbound::store::PoolStore;

#[derive(Tabled)]
struct BettorRow {
    #[tabled(rename = "Bettor")]
    name: String,
}

/// Execute a `bettor` subcommand.
pub fn execute<S: PoolStore>(pool: &BettingPool<S>, command: &BettorCommand) -> Result<ExitCode> {
    match command {
        BettorCommand::List => {
            let bettors = pool.bettors()?;
            if output::is_json() {
                output::json_output(&bettors)?;
            } else {
                output::section("Bettors");
                let rows = bettors
                    .into_iter()
                    .map(|b| BettorRow { name: b.name })
                    .collect();
                output::table(rows, "no bettors yet");
            }
        }
        BettorCommand::Add(args) => {
            pool.add_bettor(&args.name)?;
            output::success(&format!("bettor {} added", output::highlight(&args.name)));
        }
        BettorCommand::Rename(args) => {
            pool.rename_bettor(&args.current, &args.new_name)?;
            output::success(&format!(
                "bettor {} renamed to {}",
                args.current,
                output::highlight(&args.new_name)
            ));
        }
        BettorCommand::Delete(args) => {
            let deleted = pool.delete_bettor(&args.name)?;
            if output::is_json() {
                output::json_output(&json!({ "bettor": args.name, "deleted": deleted }))?;
            } else if deleted {
                output::success(&format!("bettor {} deleted", output::highlight(&args.name)));
            } else {
                output::warning(&format!("bettor {} does not exist", args.name));
            }
            if !deleted {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
