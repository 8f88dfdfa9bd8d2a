//! Command-line interface definitions.
//!
//! Defines the `eporra` CLI using `clap`. Commands are grouped by the record
//! they act on: races (with their competitors), bettors and bets.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::application::pool::CompetitorChange;

/// Parimutuel betting pool manager
#[derive(Parser, Debug)]
#[command(name = "eporra")]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: ~/.eporra/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database profile, overriding the configuration
    #[arg(long, global = true, value_enum)]
    pub profile: Option<ProfileArg>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Database profile selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Production,
    Test,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage races, their competitors and settlement
    #[command(subcommand)]
    Race(RaceCommand),

    /// Manage bettors
    #[command(subcommand)]
    Bettor(BettorCommand),

    /// Place, edit and delete bets
    #[command(subcommand)]
    Bet(BetCommand),
}

/// Subcommands for `eporra race`.
#[derive(Subcommand, Debug)]
pub enum RaceCommand {
    /// List all races
    List,
    /// Show one race with its competitors
    Show(RaceArg),
    /// Create a race, or edit an open one with `--existing`
    Save(RaceSaveArgs),
    /// List the competitors of a race
    Competitors(RaceArg),
    /// List the bets of a race
    Bets(RaceArg),
    /// Declare the winner and close its race
    Settle(SettleArgs),
    /// Compute payouts and house profit
    Report(ReportArgs),
    /// Delete a race that has no bets
    Delete(RaceArg),
    /// Remove a competitor and the bets placed on it
    DropCompetitor(DropCompetitorArgs),
}

#[derive(Args, Debug)]
pub struct RaceArg {
    /// Race name
    pub race: String,
}

#[derive(Args, Debug)]
pub struct RaceSaveArgs {
    /// Race name
    pub race: String,

    /// Edit an existing race instead of creating one
    #[arg(long)]
    pub existing: bool,

    /// Competitor as NAME=PROB, or existing:NAME=PROB to edit the one at
    /// the same position
    #[arg(short = 'c', long = "competitor", value_name = "NAME=PROB")]
    pub competitors: Vec<CompetitorChange>,
}

#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Winning competitor
    pub winner: String,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Race name
    pub race: String,
    /// Winning competitor
    pub winner: String,
}

#[derive(Args, Debug)]
pub struct DropCompetitorArgs {
    /// Race name
    pub race: String,
    /// Competitor name
    pub name: String,
}

/// Subcommands for `eporra bettor`.
#[derive(Subcommand, Debug)]
pub enum BettorCommand {
    /// List all bettors
    List,
    /// Register a bettor
    Add(BettorArg),
    /// Rename a bettor; their bets follow
    Rename(BettorRenameArgs),
    /// Delete a bettor and their bets
    Delete(BettorArg),
}

#[derive(Args, Debug)]
pub struct BettorArg {
    /// Bettor name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct BettorRenameArgs {
    /// Current name
    pub current: String,
    /// New name
    pub new_name: String,
}

/// Subcommands for `eporra bet`.
#[derive(Subcommand, Debug)]
pub enum BetCommand {
    /// Place a bet
    #[command(allow_negative_numbers = true)]
    Place(BetPlaceArgs),
    /// Reassign the bet at a position of `race bets`
    #[command(allow_negative_numbers = true)]
    Edit(BetEditArgs),
    /// Delete the bet at a position of `race bets`
    Delete(BetPositionArgs),
}

#[derive(Args, Debug)]
pub struct BetPlaceArgs {
    pub bettor: String,
    pub race: String,
    pub amount: Decimal,
    pub competitor: String,
}

#[derive(Args, Debug)]
pub struct BetEditArgs {
    pub race: String,
    /// Position as listed by `race bets`, starting at 1
    pub position: NonZeroUsize,
    pub bettor: String,
    /// New amount; must be greater than one
    pub amount: String,
    pub competitor: String,
}

#[derive(Args, Debug)]
pub struct BetPositionArgs {
    pub race: String,
    /// Position as listed by `race bets`, starting at 1
    pub position: NonZeroUsize,
}
