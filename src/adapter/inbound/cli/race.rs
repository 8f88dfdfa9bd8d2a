//! Handlers for `eporra race ...`.

use std::process::ExitCode;

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::{
    DropCompetitorArgs, RaceCommand, RaceSaveArgs, ReportArgs,
};
use crate::adapter::inbound::cli::output;
use crate::application::pool::{BettingPool, RaceDeletion};
use crate::domain::{BetView, CompetitorView, RaceView};
use crate::error::{Entity, Error, Result};
use crate::port::outbound::store::PoolStore;

#[derive(Tabled)]
struct RaceRow {
    #[tabled(rename = "Race")]
    name: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Competitors")]
    competitors: usize,
    #[tabled(rename = "House profit")]
    house_profit: String,
}

impl From<&RaceView> for RaceRow {
    fn from(race: &RaceView) -> Self {
        Self {
            name: race.name.clone(),
            status: if race.open { "open" } else { "closed" },
            competitors: race.competitors.len(),
            house_profit: race
                .house_profit
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
        }
    }
}

#[derive(Tabled)]
struct CompetitorRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Competitor")]
    name: String,
    #[tabled(rename = "Probability")]
    probability: String,
}

fn competitor_rows(competitors: &[CompetitorView]) -> Vec<CompetitorRow> {
    competitors
        .iter()
        .enumerate()
        .map(|(i, c)| CompetitorRow {
            position: i + 1,
            name: c.name.clone(),
            probability: c.probability.to_string(),
        })
        .collect()
}

#[derive(Tabled)]
struct BetRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Bettor")]
    bettor: String,
    #[tabled(rename = "Competitor")]
    competitor: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Payout")]
    payout: String,
}

fn bet_rows(bets: &[BetView]) -> Vec<BetRow> {
    bets.iter()
        .enumerate()
        .map(|(i, b)| BetRow {
            position: i + 1,
            bettor: b.bettor.clone(),
            competitor: b.competitor.clone(),
            amount: b.amount.to_string(),
            payout: b.payout.to_string(),
        })
        .collect()
}

#[derive(Tabled)]
struct PayoutRow {
    #[tabled(rename = "Bettor")]
    bettor: String,
    #[tabled(rename = "Payout")]
    payout: String,
}

/// Execute a `race` subcommand.
pub fn execute<S: PoolStore>(pool: &BettingPool<S>, command: &RaceCommand) -> Result<ExitCode> {
    match command {
        RaceCommand::List => list(pool)?,
        RaceCommand::Show(args) => show(pool, &args.race)?,
        RaceCommand::Save(args) => save(pool, args)?,
        RaceCommand::Competitors(args) => competitors(pool, &args.race)?,
        RaceCommand::Bets(args) => bets(pool, &args.race)?,
        RaceCommand::Settle(args) => {
            pool.terminate_race(&args.winner)?;
            output::success(&format!(
                "{} wins; race closed",
                output::highlight(&args.winner)
            ));
        }
        RaceCommand::Report(args) => report(pool, args)?,
        RaceCommand::Delete(args) => return delete(pool, &args.race),
        RaceCommand::DropCompetitor(args) => drop_competitor(pool, args)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn list<S: PoolStore>(pool: &BettingPool<S>) -> Result<()> {
    let races = pool.races()?;
    if output::is_json() {
        return output::json_output(&races);
    }

    output::section("Races");
    output::table(races.iter().map(RaceRow::from).collect(), "no races yet");
    Ok(())
}

fn show<S: PoolStore>(pool: &BettingPool<S>, name: &str) -> Result<()> {
    let race = pool
        .race(name)?
        .ok_or_else(|| Error::not_found(Entity::Race, name))?;
    if output::is_json() {
        return output::json_output(&race);
    }

    output::section(&race.name);
    output::field("Status", if race.open { output::positive("open") } else { output::muted("closed") });
    if let Some(profit) = race.house_profit {
        output::field("House profit", profit);
    }
    output::table(competitor_rows(&race.competitors), "no competitors");
    Ok(())
}

fn save<S: PoolStore>(pool: &BettingPool<S>, args: &RaceSaveArgs) -> Result<()> {
    pool.save_race(&args.race, &args.competitors, !args.existing)?;

    let verb = if args.existing { "updated" } else { "created" };
    output::success(&format!(
        "race {} {verb} with {} competitor change(s)",
        output::highlight(args.race.trim()),
        args.competitors.len()
    ));
    Ok(())
}

fn competitors<S: PoolStore>(pool: &BettingPool<S>, race: &str) -> Result<()> {
    let competitors = pool.race_competitors(race)?;
    if output::is_json() {
        return output::json_output(&competitors);
    }

    output::section(&format!("Competitors in {race}"));
    output::table(competitor_rows(&competitors), "no competitors");
    Ok(())
}

fn bets<S: PoolStore>(pool: &BettingPool<S>, race: &str) -> Result<()> {
    let bets = pool.race_bets(race)?;
    if output::is_json() {
        return output::json_output(&bets);
    }

    output::section(&format!("Bets on {race}"));
    output::table(bet_rows(&bets), "no bets yet");
    Ok(())
}

fn report<S: PoolStore>(pool: &BettingPool<S>, args: &ReportArgs) -> Result<()> {
    let report = pool.winnings_report(&args.race, &args.winner)?;
    if output::is_json() {
        return output::json_output(&report);
    }

    output::section(&format!("Winnings for {}", args.race));
    let rows = report
        .entries
        .iter()
        .map(|e| PayoutRow {
            bettor: e.bettor.clone(),
            payout: e.payout.to_string(),
        })
        .collect();
    output::table(rows, "no bets placed");
    output::field("Total paid", report.total_paid());
    output::field("House profit", output::positive(report.house_profit));
    Ok(())
}

fn delete<S: PoolStore>(pool: &BettingPool<S>, race: &str) -> Result<ExitCode> {
    let outcome = pool.delete_race(race)?;
    if output::is_json() {
        output::json_output(&json!({
            "race": race,
            "outcome": outcome,
            "deleted": outcome.as_flag(),
        }))?;
    } else {
        match outcome {
            RaceDeletion::Deleted => output::success(&format!("race {} deleted", output::highlight(race))),
            RaceDeletion::HasBets => {
                output::warning(&format!("race {race} has bets and was kept"));
                output::hint("delete its bets first with `eporra bet delete`");
            }
            RaceDeletion::NotFound => output::warning(&format!("race {race} does not exist")),
        }
    }

    Ok(if outcome.is_deleted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn drop_competitor<S: PoolStore>(pool: &BettingPool<S>, args: &DropCompetitorArgs) -> Result<()> {
    pool.delete_competitor(&args.race, &args.name)?;
    output::success(&format!(
        "competitor {} removed from {}",
        output::highlight(&args.name),
        args.race
    ));
    Ok(())
}
