//! The betting-pool manager.
//!
//! [`BettingPool`] is the single entry point for every mutation and report.
//! Each operation runs inside one store transaction: if any step fails, the
//! writes already made by that operation are rolled back and the error is
//! returned unchanged. The only exception is [`BettingPool::edit_bet`], which
//! never fails and reports a [`BetEdit`] instead.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::change::{ChangeState, CompetitorChange};
use super::outcome::{BetEdit, EditRejection, RaceDeletion};
use crate::domain::error::DomainError;
use crate::domain::{
    name, payout, Bet, BetView, Bettor, BettorView, Competitor, CompetitorView, NewBet,
    Probability, Race, RaceView, WinningsReport,
};
use crate::error::{Entity, Error, Result};
use crate::port::outbound::store::{PoolStore, Repository};

/// Betting-pool manager over an injected store.
///
/// # Example
///
/// ```
/// use eporra::adapter::outbound::memory::MemoryStore;
/// use eporra::application::pool::{BettingPool, CompetitorChange};
/// use rust_decimal_macros::dec;
///
/// let pool = BettingPool::new(MemoryStore::new());
/// pool.save_race(
///     "Derby",
///     &[
///         CompetitorChange::new("Bolt", dec!(0.5)),
///         CompetitorChange::new("Flash", dec!(0.5)),
///     ],
///     true,
/// )?;
/// pool.add_bettor("Ana")?;
/// pool.create_bet("Ana", "Derby", dec!(10), "Bolt")?;
/// pool.terminate_race("Bolt")?;
///
/// let report = pool.winnings_report("Derby", "Bolt")?;
/// assert_eq!(report.entries[0].payout, dec!(20.00));
/// # Ok::<(), eporra::error::Error>(())
/// ```
pub struct BettingPool<S> {
    store: S,
}

impl<S: PoolStore> BettingPool<S> {
    /// Create a manager that owns `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn run<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>,
    {
        self.store.transaction(f).map_err(|e| {
            debug!(operation, error = %e, "transaction rolled back");
            e
        })
    }

    // ---------------------------------------------------------------------
    // Races
    // ---------------------------------------------------------------------

    /// Create or update a race together with its competitor changes.
    ///
    /// The probabilities of `changes` must add up to exactly one. `New`
    /// records add a competitor; `Existing` records overwrite the competitor
    /// at the same position in the race.
    ///
    /// # Errors
    /// Any name, probability or uniqueness violation; `NotFound` when editing
    /// a race that does not exist. Nothing is persisted on error.
    pub fn save_race(
        &self,
        name: &str,
        changes: &[CompetitorChange],
        is_new_race: bool,
    ) -> Result<()> {
        let saved = self.run("save_race", |repo| {
            let race = if is_new_race {
                create_race(repo, name)?
            } else {
                let race = find_race(repo, name.trim())?;
                race.ensure_open()?;
                race
            };

            let probabilities = changes.iter().map(|c| c.probability);
            let sum = payout::checked_sum(probabilities, "probability sum")?;
            if sum != Decimal::ONE {
                return Err(DomainError::ProbabilitiesDoNotSumToOne { sum }.into());
            }

            for (position, change) in changes.iter().enumerate() {
                match change.state {
                    ChangeState::New => {
                        add_competitor_to(repo, &race.name, &change.name, change.probability)?;
                    }
                    ChangeState::Existing => edit_competitor_at(repo, &race, position, change)?,
                }
            }
            Ok(race.name)
        })?;

        info!(race = %saved, competitors = changes.len(), new = is_new_race, "race saved");
        Ok(())
    }

    /// All races sorted by name, each with its competitors.
    ///
    /// # Errors
    /// Store errors only.
    pub fn races(&self) -> Result<Vec<RaceView>> {
        let races = self.run("races", |repo| repo.list_races())?;
        Ok(races.iter().map(RaceView::from).collect())
    }

    /// A single race, if it exists.
    ///
    /// # Errors
    /// Store errors only.
    pub fn race(&self, name: &str) -> Result<Option<RaceView>> {
        let race = self.run("race", |repo| repo.find_race(name))?;
        Ok(race.as_ref().map(RaceView::from))
    }

    /// Declare the winner of its race and close the race.
    ///
    /// # Errors
    /// [`DomainError::NoWinnerSelected`] for an empty name, `NotFound` for an
    /// unknown competitor, [`DomainError::RaceAlreadyClosed`] when the race
    /// was already settled.
    pub fn terminate_race(&self, winner: &str) -> Result<()> {
        if winner.is_empty() {
            return Err(DomainError::NoWinnerSelected.into());
        }

        let race = self.run("terminate_race", |repo| {
            let mut competitor = repo
                .find_competitor(winner)?
                .ok_or_else(|| Error::not_found(Entity::Competitor, winner))?;
            let mut race = find_race(repo, &competitor.race)?;

            race.close()?;
            competitor.winner = true;
            repo.update_competitor(winner, &competitor)?;
            repo.update_race(&race)?;
            Ok(race.name)
        })?;

        info!(race = %race, winner, "race settled");
        Ok(())
    }

    /// Compute and store the payout of every bet of a race and the house
    /// profit.
    ///
    /// # Errors
    /// `NotFound` when the race or the competitor (within that race) is missing;
    /// `NumericOverflow` when a payout or total does not fit, in which case no
    /// payout is stored.
    pub fn winnings_report(&self, race: &str, winner: &str) -> Result<WinningsReport> {
        let report = self.run("winnings_report", |repo| {
            let mut stored = find_race(repo, race)?;
            let competitor = find_race_competitor(repo, race, winner)?;

            let mut bets = repo.race_bets(race)?;
            let report = payout::settle(&mut bets, &competitor)?;
            for bet in &bets {
                repo.update_bet(bet)?;
            }

            stored.house_profit = Some(report.house_profit);
            repo.update_race(&stored)?;
            Ok(report)
        })?;

        info!(
            race,
            winner,
            bets = report.entries.len(),
            house_profit = %report.house_profit,
            "winnings report generated"
        );
        Ok(report)
    }

    /// Delete a race that has no bets.
    ///
    /// # Errors
    /// Store errors only; a race with bets yields [`RaceDeletion::HasBets`].
    pub fn delete_race(&self, name: &str) -> Result<RaceDeletion> {
        let outcome = self.run("delete_race", |repo| {
            if repo.find_race(name)?.is_none() {
                return Ok(RaceDeletion::NotFound);
            }
            if !repo.race_bets(name)?.is_empty() {
                return Ok(RaceDeletion::HasBets);
            }
            repo.delete_race(name)?;
            Ok(RaceDeletion::Deleted)
        })?;

        info!(race = name, outcome = ?outcome, "race deletion");
        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Competitors
    // ---------------------------------------------------------------------

    /// Append a competitor to an open race.
    ///
    /// # Errors
    /// Name or probability violations, `NotFound` for an unknown race,
    /// [`DomainError::RaceClosed`] for a settled race.
    pub fn add_competitor(&self, race: &str, name: &str, probability: Decimal) -> Result<()> {
        self.run("add_competitor", |repo| {
            find_race(repo, race)?.ensure_open()?;
            add_competitor_to(repo, race, name, probability)
        })?;

        info!(race, competitor = name, %probability, "competitor added");
        Ok(())
    }

    /// Competitors of a race in insertion order.
    ///
    /// # Errors
    /// `NotFound` for an unknown race.
    pub fn race_competitors(&self, race: &str) -> Result<Vec<CompetitorView>> {
        let race = self.run("race_competitors", |repo| find_race(repo, race))?;
        Ok(race.competitors.iter().map(CompetitorView::from).collect())
    }

    /// A competitor of a race, if it exists.
    ///
    /// # Errors
    /// Store errors only.
    pub fn competitor(&self, race: &str, name: &str) -> Result<Option<CompetitorView>> {
        let competitor = self.run("competitor", |repo| repo.find_competitor(name))?;
        Ok(competitor
            .filter(|c| c.race == race)
            .as_ref()
            .map(CompetitorView::from))
    }

    /// Remove a competitor of an open race and every bet placed on it.
    ///
    /// # Errors
    /// `NotFound` for an unknown race or competitor,
    /// [`DomainError::RaceClosed`] for a settled race.
    pub fn delete_competitor(&self, race: &str, name: &str) -> Result<()> {
        self.run("delete_competitor", |repo| {
            find_race(repo, race)?.ensure_open()?;
            if !repo.delete_competitor(race, name)? {
                return Err(Error::not_found(Entity::Competitor, name));
            }
            Ok(())
        })?;

        info!(race, competitor = name, "competitor deleted");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Bettors
    // ---------------------------------------------------------------------

    /// Register a bettor.
    ///
    /// # Errors
    /// [`DomainError::InvalidBettorName`] or [`DomainError::DuplicateBettor`].
    pub fn add_bettor(&self, name: &str) -> Result<()> {
        self.run("add_bettor", |repo| {
            let name = name::bettor_name(name)?;
            if repo.find_bettor(name)?.is_some() {
                return Err(DomainError::DuplicateBettor.into());
            }
            repo.insert_bettor(&Bettor::new(name))
        })?;

        info!(bettor = name, "bettor added");
        Ok(())
    }

    /// All bettors sorted by name.
    ///
    /// # Errors
    /// Store errors only.
    pub fn bettors(&self) -> Result<Vec<BettorView>> {
        let bettors = self.run("bettors", |repo| repo.list_bettors())?;
        Ok(bettors.iter().map(BettorView::from).collect())
    }

    /// Rename a bettor; their bets follow.
    ///
    /// # Errors
    /// Same name rules as [`BettingPool::add_bettor`], `NotFound` for an
    /// unknown bettor.
    pub fn rename_bettor(&self, current: &str, new_name: &str) -> Result<()> {
        self.run("rename_bettor", |repo| {
            let new_name = name::bettor_name(new_name)?;
            if new_name == current {
                return repo
                    .find_bettor(current)?
                    .map(|_| ())
                    .ok_or_else(|| Error::not_found(Entity::Bettor, current));
            }
            if repo.find_bettor(new_name)?.is_some() {
                return Err(DomainError::DuplicateBettor.into());
            }
            if !repo.rename_bettor(current, new_name)? {
                return Err(Error::not_found(Entity::Bettor, current));
            }
            Ok(())
        })?;

        info!(bettor = current, new_name, "bettor renamed");
        Ok(())
    }

    /// Remove a bettor and all of their bets. Returns whether it existed.
    ///
    /// # Errors
    /// Store errors only.
    pub fn delete_bettor(&self, name: &str) -> Result<bool> {
        let deleted = self.run("delete_bettor", |repo| repo.delete_bettor(name))?;
        info!(bettor = name, deleted, "bettor deletion");
        Ok(deleted)
    }

    // ---------------------------------------------------------------------
    // Bets
    // ---------------------------------------------------------------------

    /// Place a bet on a competitor of an open race.
    ///
    /// # Errors
    /// [`DomainError::NonPositiveAmount`] (checked first),
    /// [`DomainError::RaceClosed`], or `NotFound` for any missing reference.
    pub fn create_bet(&self, bettor: &str, race: &str, amount: Decimal, competitor: &str) -> Result<Bet> {
        let request = NewBet::try_new(bettor, race, amount, competitor)?;

        let bet = self.run("create_bet", |repo| {
            find_race(repo, race)?.ensure_open()?;
            find_bettor(repo, bettor)?;
            find_race_competitor(repo, race, competitor)?;
            repo.insert_bet(request)
        })?;

        info!(bet = %bet.id, bettor, race, competitor, %amount, "bet placed");
        Ok(bet)
    }

    /// Bets of a race sorted by bettor name.
    ///
    /// # Errors
    /// Store errors only.
    pub fn race_bets(&self, race: &str) -> Result<Vec<BetView>> {
        let bets = self.race_bet_records(race)?;
        Ok(bets.iter().map(BetView::from).collect())
    }

    /// Bets of a race as entities, in the same order as [`BettingPool::race_bets`].
    ///
    /// # Errors
    /// Store errors only.
    pub fn race_bet_records(&self, race: &str) -> Result<Vec<Bet>> {
        self.run("race_bets", |repo| repo.race_bets(race))
    }

    /// The bet at `position` of the sorted bet list, if any.
    ///
    /// # Errors
    /// Store errors only.
    pub fn bet(&self, race: &str, position: usize) -> Result<Option<BetView>> {
        let bets = self.race_bet_records(race)?;
        Ok(bets.get(position).map(BetView::from))
    }

    /// Reassign the bet at `position` of the race's sorted bet list.
    ///
    /// Applies only when `amount` is present and greater than one. Never
    /// returns an error: failures are logged and reported as
    /// [`BetEdit::Rejected`]. Only the bet at `position` changes, even when
    /// the same bettor has other bets on the same competitor.
    pub fn edit_bet(
        &self,
        position: usize,
        bettor: &str,
        race: &str,
        amount: Option<Decimal>,
        competitor: &str,
    ) -> BetEdit {
        let Some(amount) = amount.filter(|a| *a > Decimal::ONE) else {
            return BetEdit::Rejected(EditRejection::AmountNotAboveOne);
        };

        let result = self.run("edit_bet", |repo| {
            find_race(repo, race)?.ensure_open()?;
            let Some(mut bet) = repo.race_bets(race)?.into_iter().nth(position) else {
                return Ok(None);
            };
            find_bettor(repo, bettor)?;
            find_race_competitor(repo, race, competitor)?;

            bet.amount = amount;
            bet.bettor = bettor.to_string();
            bet.competitor = competitor.to_string();
            repo.update_bet(&bet)?;
            Ok(Some(bet.id))
        });

        match result {
            Ok(None) => {
                warn!(race, position, "no bet to edit");
                BetEdit::Rejected(EditRejection::PositionOutOfRange(position))
            }
            Ok(Some(id)) => {
                info!(bet = %id, race, bettor, competitor, %amount, "bet edited");
                BetEdit::Applied
            }
            Err(e) => {
                warn!(race, position, error = %e, "bet edit failed");
                BetEdit::Rejected(EditRejection::Failed(e.to_string()))
            }
        }
    }

    /// Delete the bet at `position` of the race's sorted bet list. Returns
    /// whether a bet was removed.
    ///
    /// # Errors
    /// Store errors only.
    pub fn delete_bet(&self, race: &str, position: usize) -> Result<bool> {
        let deleted = self.run("delete_bet", |repo| {
            match repo.race_bets(race)?.get(position) {
                Some(bet) => repo.delete_bet(bet.id),
                None => Ok(false),
            }
        })?;

        info!(race, position, deleted, "bet deletion");
        Ok(deleted)
    }
}

fn find_race(repo: &mut dyn Repository, name: &str) -> Result<Race> {
    repo.find_race(name)?
        .ok_or_else(|| Error::not_found(Entity::Race, name))
}

fn find_bettor(repo: &mut dyn Repository, name: &str) -> Result<Bettor> {
    repo.find_bettor(name)?
        .ok_or_else(|| Error::not_found(Entity::Bettor, name))
}

/// Look up a competitor and check it runs in `race`.
fn find_race_competitor(repo: &mut dyn Repository, race: &str, name: &str) -> Result<Competitor> {
    repo.find_competitor(name)?
        .filter(|c| c.race == race)
        .ok_or_else(|| Error::not_found(Entity::Competitor, format!("{name} in {race}")))
}

fn create_race(repo: &mut dyn Repository, raw: &str) -> Result<Race> {
    let name = name::race_name(raw)?;
    if repo.find_race(&name)?.is_some() {
        return Err(DomainError::DuplicateRace { name }.into());
    }
    let race = Race::new(name);
    repo.insert_race(&race)?;
    Ok(race)
}

/// Checks run in order: blank name, duplicate, length, range.
fn add_competitor_to(
    repo: &mut dyn Repository,
    race: &str,
    name: &str,
    probability: Decimal,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyCompetitorName.into());
    }
    if repo.find_competitor(name)?.is_some() {
        return Err(DomainError::DuplicateCompetitor {
            name: name.to_string(),
        }
        .into());
    }
    let name = name::competitor_name(name)?;
    let probability = Probability::try_new(probability)?;

    repo.insert_competitor(&Competitor::new(name, race, probability))
}

fn edit_competitor_at(
    repo: &mut dyn Repository,
    race: &Race,
    position: usize,
    change: &CompetitorChange,
) -> Result<()> {
    let current = race
        .competitors
        .get(position)
        .ok_or_else(|| Error::not_found(Entity::Competitor, format!("{} #{position}", race.name)))?;

    let name = name::competitor_name(&change.name)?;
    if name != current.name && repo.find_competitor(name)?.is_some() {
        return Err(DomainError::DuplicateCompetitor {
            name: name.to_string(),
        }
        .into());
    }

    let updated = Competitor {
        name: name.to_string(),
        race: race.name.clone(),
        probability: Probability::try_new(change.probability)?,
        winner: current.winner,
    };
    repo.update_competitor(&current.name, &updated)
}
