//! Handlers for `eporra bet ...`.

use std::process::ExitCode;

use serde_json::json;

use crate::adapter::inbound::cli::command::{BetCommand, BetEditArgs, BetPlaceArgs, BetPositionArgs};
use crate::adapter::inbound::cli::output;
use crate::application::pool::{BetEdit, BettingPool};
use crate::domain::probability::parse_number;
use crate::error::Result;
use crate::port::outbound::store::PoolStore;

/// Execute a `bet` subcommand.
pub fn execute<S: PoolStore>(pool: &BettingPool<S>, command: &BetCommand) -> Result<ExitCode> {
    match command {
        BetCommand::Place(args) => place(pool, args),
        BetCommand::Edit(args) => Ok(edit(pool, args)),
        BetCommand::Delete(args) => delete(pool, args),
    }
}

fn place<S: PoolStore>(pool: &BettingPool<S>, args: &BetPlaceArgs) -> Result<ExitCode> {
    let bet = pool.create_bet(&args.bettor, &args.race, args.amount, &args.competitor)?;
    if output::is_json() {
        output::json_output(&bet)?;
    } else {
        output::success(&format!(
            "{} bet {} on {} in {}",
            args.bettor,
            output::highlight(bet.amount),
            output::highlight(&args.competitor),
            args.race
        ));
    }
    Ok(ExitCode::SUCCESS)
}

fn edit<S: PoolStore>(pool: &BettingPool<S>, args: &BetEditArgs) -> ExitCode {
    // A non-numeric amount counts as no amount at all.
    let amount = parse_number(&args.amount).ok();
    let position = args.position.get() - 1;
    let edit = pool.edit_bet(position, &args.bettor, &args.race, amount, &args.competitor);

    match &edit {
        BetEdit::Applied => {
            if output::is_json() {
                println!("{}", json!({ "edited": true }));
            } else {
                output::success(&format!("bet #{} on {} updated", args.position, args.race));
            }
            ExitCode::SUCCESS
        }
        BetEdit::Rejected(reason) => {
            if output::is_json() {
                println!("{}", json!({ "edited": false, "rejection": reason }));
            } else {
                output::error(&reason.to_string());
            }
            ExitCode::FAILURE
        }
    }
}

fn delete<S: PoolStore>(pool: &BettingPool<S>, args: &BetPositionArgs) -> Result<ExitCode> {
    let deleted = pool.delete_bet(&args.race, args.position.get() - 1)?;
    if output::is_json() {
        output::json_output(&json!({ "deleted": deleted }))?;
    } else if deleted {
        output::success(&format!("bet #{} on {} deleted", args.position, args.race));
    } else {
        output::warning(&format!("no bet #{} on {}", args.position, args.race));
    }

    Ok(if deleted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
