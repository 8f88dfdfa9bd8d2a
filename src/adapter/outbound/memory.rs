//! In-memory store implementation for testing.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Bet, BetId, Bettor, Competitor, NewBet, Race};
use crate::error::{Error, Result};
use crate::port::outbound::store::{PoolStore, Repository};

#[derive(Debug, Clone)]
struct RaceRecord {
    open: bool,
    house_profit: Option<Decimal>,
}

/// Snapshot of every table.
#[derive(Debug, Clone, Default)]
struct PoolTables {
    races: BTreeMap<String, RaceRecord>,
    /// Insertion order doubles as competitor position.
    competitors: Vec<Competitor>,
    bettors: BTreeSet<String>,
    bets: Vec<Bet>,
    next_bet_id: i32,
}

/// In-memory store for testing purposes.
///
/// A transaction works on a copy of the tables, which replaces the shared
/// copy only when the closure succeeds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<PoolTables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PoolStore for MemoryStore {
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>,
    {
        let mut tables = self.tables.lock();
        let mut working = tables.clone();
        let value = f(&mut working)?;
        *tables = working;
        Ok(value)
    }
}

impl PoolTables {
    fn hydrate(&self, name: &str, record: &RaceRecord) -> Race {
        Race {
            name: name.to_string(),
            open: record.open,
            house_profit: record.house_profit,
            competitors: self
                .competitors
                .iter()
                .filter(|c| c.race == name)
                .cloned()
                .collect(),
        }
    }
}

impl Repository for PoolTables {
    fn find_race(&mut self, name: &str) -> Result<Option<Race>> {
        Ok(self.races.get(name).map(|r| self.hydrate(name, r)))
    }

    fn list_races(&mut self) -> Result<Vec<Race>> {
        Ok(self
            .races
            .iter()
            .map(|(name, r)| self.hydrate(name, r))
            .collect())
    }

    fn insert_race(&mut self, race: &Race) -> Result<()> {
        if self.races.contains_key(&race.name) {
            return Err(Error::Database(format!(
                "UNIQUE constraint failed: races.name ({})",
                race.name
            )));
        }
        self.races.insert(
            race.name.clone(),
            RaceRecord {
                open: race.open,
                house_profit: race.house_profit,
            },
        );
        Ok(())
    }

    fn update_race(&mut self, race: &Race) -> Result<()> {
        if let Some(record) = self.races.get_mut(&race.name) {
            record.open = race.open;
            record.house_profit = race.house_profit;
        }
        Ok(())
    }

    fn delete_race(&mut self, name: &str) -> Result<bool> {
        self.bets.retain(|b| b.race != name);
        self.competitors.retain(|c| c.race != name);
        Ok(self.races.remove(name).is_some())
    }

    fn find_competitor(&mut self, name: &str) -> Result<Option<Competitor>> {
        Ok(self.competitors.iter().find(|c| c.name == name).cloned())
    }

    fn insert_competitor(&mut self, competitor: &Competitor) -> Result<()> {
        self.competitors.push(competitor.clone());
        Ok(())
    }

    fn update_competitor(&mut self, current_name: &str, competitor: &Competitor) -> Result<()> {
        if let Some(slot) = self
            .competitors
            .iter_mut()
            .find(|c| c.name == current_name && c.race == competitor.race)
        {
            *slot = competitor.clone();
        }
        for bet in self.bets.iter_mut().filter(|b| b.competitor == current_name) {
            bet.competitor = competitor.name.clone();
        }
        Ok(())
    }

    fn delete_competitor(&mut self, race: &str, name: &str) -> Result<bool> {
        let before = self.competitors.len();
        self.competitors.retain(|c| !(c.race == race && c.name == name));
        if self.competitors.len() == before {
            return Ok(false);
        }
        self.bets.retain(|b| !(b.race == race && b.competitor == name));
        Ok(true)
    }

    fn find_bettor(&mut self, name: &str) -> Result<Option<Bettor>> {
        Ok(self.bettors.get(name).map(|n| Bettor::new(n.clone())))
    }

    fn list_bettors(&mut self) -> Result<Vec<Bettor>> {
        Ok(self.bettors.iter().map(|n| Bettor::new(n.clone())).collect())
    }

    fn insert_bettor(&mut self, bettor: &Bettor) -> Result<()> {
        self.bettors.insert(bettor.name.clone());
        Ok(())
    }

    fn rename_bettor(&mut self, current_name: &str, new_name: &str) -> Result<bool> {
        if !self.bettors.remove(current_name) {
            return Ok(false);
        }
        self.bettors.insert(new_name.to_string());
        for bet in self.bets.iter_mut().filter(|b| b.bettor == current_name) {
            bet.bettor = new_name.to_string();
        }
        Ok(true)
    }

    fn delete_bettor(&mut self, name: &str) -> Result<bool> {
        self.bets.retain(|b| b.bettor != name);
        Ok(self.bettors.remove(name))
    }

    fn insert_bet(&mut self, bet: NewBet) -> Result<Bet> {
        self.next_bet_id += 1;
        let stored = Bet::from_new(BetId::new(self.next_bet_id), bet);
        self.bets.push(stored.clone());
        Ok(stored)
    }

    fn race_bets(&mut self, race: &str) -> Result<Vec<Bet>> {
        let mut bets: Vec<Bet> = self.bets.iter().filter(|b| b.race == race).cloned().collect();
        bets.sort_by(|a, b| a.bettor.cmp(&b.bettor).then(a.id.cmp(&b.id)));
        Ok(bets)
    }

    fn update_bet(&mut self, bet: &Bet) -> Result<()> {
        if let Some(slot) = self.bets.iter_mut().find(|b| b.id == bet.id) {
            *slot = bet.clone();
        }
        Ok(())
    }

    fn delete_bet(&mut self, id: BetId) -> Result<bool> {
        let before = self.bets.len();
        self.bets.retain(|b| b.id != id);
        Ok(self.bets.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Probability;
    use rust_decimal_macros::dec;

    fn seed(store: &MemoryStore) {
        store
            .transaction(|repo| {
                repo.insert_race(&Race::new("derby"))?;
                repo.insert_competitor(&Competitor::new(
                    "bolt",
                    "derby",
                    Probability::try_new(dec!(0.5))?,
                ))?;
                repo.insert_bettor(&Bettor::new("ana"))?;
                repo.insert_bet(NewBet::try_new("ana", "derby", dec!(10), "bolt")?)?;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn failed_transaction_leaves_tables_untouched() {
        let store = MemoryStore::new();
        seed(&store);

        let result: Result<()> = store.transaction(|repo| {
            repo.insert_bettor(&Bettor::new("zoe"))?;
            repo.delete_race("derby")?;
            Err(Error::Database("boom".into()))
        });

        assert!(result.is_err());
        let (races, bettors) = store
            .transaction(|repo| Ok((repo.list_races()?, repo.list_bettors()?)))
            .unwrap();
        assert_eq!(races.len(), 1);
        assert_eq!(bettors, vec![Bettor::new("ana")]);
    }

    #[test]
    fn delete_race_cascades() {
        let store = MemoryStore::new();
        seed(&store);

        let deleted = store.transaction(|repo| repo.delete_race("derby")).unwrap();
        assert!(deleted);

        let (competitor, bets) = store
            .transaction(|repo| Ok((repo.find_competitor("bolt")?, repo.race_bets("derby")?)))
            .unwrap();
        assert!(competitor.is_none());
        assert!(bets.is_empty());
    }

    #[test]
    fn rename_bettor_rewrites_bets() {
        let store = MemoryStore::new();
        seed(&store);

        store
            .transaction(|repo| repo.rename_bettor("ana", "anabel"))
            .unwrap();

        let bets = store.transaction(|repo| repo.race_bets("derby")).unwrap();
        assert_eq!(bets[0].bettor, "anabel");
    }

    #[test]
    fn bet_ids_are_sequential() {
        let store = MemoryStore::new();
        seed(&store);

        let bet = store
            .transaction(|repo| repo.insert_bet(NewBet::try_new("ana", "derby", dec!(3), "bolt")?))
            .unwrap();
        assert_eq!(bet.id, BetId::new(2));
    }
}
