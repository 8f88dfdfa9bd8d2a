//! SQLite pool store implementation.
//!
//! Provides persistent storage for races, competitors, bettors and bets using
//! SQLite and Diesel ORM. Each transaction checks a connection out of the
//! pool, runs inside `BEGIN ... COMMIT`, and hands the connection back.

use std::str::FromStr;

use diesel::dsl::max;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, create_pool, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    BetRow, BettorRow, CompetitorRow, NewBetRow, RaceRow,
};
use crate::adapter::outbound::sqlite::database::schema::{bets, bettors, competitors, races};
use crate::domain::{Bet, BetId, Bettor, Competitor, NewBet, Probability, Race};
use crate::error::{Error, Result};
use crate::port::outbound::store::{PoolStore, Repository};

/// SQLite-backed pool store.
///
/// Implements the [`PoolStore`] trait on top of a Diesel connection pool.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite pool store with the given connection pool.
    ///
    /// The schema must already exist; see [`SqliteStore::open`].
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url`, creating the schema if absent.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or migrated.
    pub fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url)?;
        {
            let mut conn = pool
                .get()
                .map_err(|e| Error::Connection(e.to_string()))?;
            configure_sqlite_connection(&mut conn)?;
        }
        run_migrations(&pool)?;
        debug!(database = database_url, "pool database ready");
        Ok(Self::new(pool))
    }
}

impl PoolStore for SqliteStore {
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T>,
    {
        let mut pooled = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        let conn: &mut SqliteConnection = &mut pooled;

        conn.transaction::<T, Error, _>(|conn| {
            let mut repo = SqliteRepository { conn };
            f(&mut repo)
        })
    }
}

/// [`Repository`] bound to a connection with an open transaction.
struct SqliteRepository<'a> {
    conn: &'a mut SqliteConnection,
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| Error::Parse(format!("{raw:?}: {e}")))
}

fn competitor_from_row(row: CompetitorRow) -> Result<Competitor> {
    let probability = Probability::try_new(parse_decimal(&row.probability)?)
        .map_err(|e| Error::Parse(e.to_string()))?;
    Ok(Competitor {
        name: row.name,
        race: row.race_name,
        probability,
        winner: row.winner,
    })
}

fn bet_from_row(row: BetRow) -> Result<Bet> {
    Ok(Bet {
        id: BetId::new(row.id),
        amount: parse_decimal(&row.amount)?,
        payout: parse_decimal(&row.payout)?,
        bettor: row.bettor_name,
        race: row.race_name,
        competitor: row.competitor_name,
    })
}

impl SqliteRepository<'_> {
    fn load_competitors(&mut self, race: &str) -> Result<Vec<Competitor>> {
        let rows: Vec<CompetitorRow> = competitors::table
            .filter(competitors::race_name.eq(race))
            .order(competitors::position.asc())
            .select(CompetitorRow::as_select())
            .load(self.conn)?;
        rows.into_iter().map(competitor_from_row).collect()
    }

    fn hydrate(&mut self, row: RaceRow) -> Result<Race> {
        let competitors = self.load_competitors(&row.name)?;
        Ok(Race {
            house_profit: row.house_profit.as_deref().map(parse_decimal).transpose()?,
            name: row.name,
            open: row.open,
            competitors,
        })
    }
}

impl Repository for SqliteRepository<'_> {
    fn find_race(&mut self, name: &str) -> Result<Option<Race>> {
        let row: Option<RaceRow> = races::table
            .find(name)
            .select(RaceRow::as_select())
            .first(self.conn)
            .optional()?;

        row.map(|r| self.hydrate(r)).transpose()
    }

    fn list_races(&mut self) -> Result<Vec<Race>> {
        let rows: Vec<RaceRow> = races::table
            .order(races::name.asc())
            .select(RaceRow::as_select())
            .load(self.conn)?;

        rows.into_iter().map(|r| self.hydrate(r)).collect()
    }

    fn insert_race(&mut self, race: &Race) -> Result<()> {
        diesel::insert_into(races::table)
            .values(&RaceRow {
                name: race.name.clone(),
                open: race.open,
                house_profit: race.house_profit.map(|p| p.to_string()),
            })
            .execute(self.conn)?;
        Ok(())
    }

    fn update_race(&mut self, race: &Race) -> Result<()> {
        diesel::update(races::table.find(&race.name))
            .set((
                races::open.eq(race.open),
                races::house_profit.eq(race.house_profit.map(|p| p.to_string())),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    fn delete_race(&mut self, name: &str) -> Result<bool> {
        diesel::delete(bets::table.filter(bets::race_name.eq(name))).execute(self.conn)?;
        diesel::delete(competitors::table.filter(competitors::race_name.eq(name)))
            .execute(self.conn)?;
        let deleted = diesel::delete(races::table.find(name)).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn find_competitor(&mut self, name: &str) -> Result<Option<Competitor>> {
        let row: Option<CompetitorRow> = competitors::table
            .filter(competitors::name.eq(name))
            .select(CompetitorRow::as_select())
            .first(self.conn)
            .optional()?;

        row.map(competitor_from_row).transpose()
    }

    fn insert_competitor(&mut self, competitor: &Competitor) -> Result<()> {
        let last: Option<i32> = competitors::table
            .filter(competitors::race_name.eq(&competitor.race))
            .select(max(competitors::position))
            .first(self.conn)?;

        diesel::insert_into(competitors::table)
            .values(&CompetitorRow {
                name: competitor.name.clone(),
                race_name: competitor.race.clone(),
                probability: competitor.probability.to_string(),
                winner: competitor.winner,
                position: last.map_or(0, |p| p + 1),
            })
            .execute(self.conn)?;
        Ok(())
    }

    fn update_competitor(&mut self, current_name: &str, competitor: &Competitor) -> Result<()> {
        diesel::update(competitors::table.find((current_name, &competitor.race)))
            .set((
                competitors::name.eq(&competitor.name),
                competitors::probability.eq(competitor.probability.to_string()),
                competitors::winner.eq(competitor.winner),
            ))
            .execute(self.conn)?;

        if current_name != competitor.name {
            diesel::update(
                bets::table
                    .filter(bets::race_name.eq(&competitor.race))
                    .filter(bets::competitor_name.eq(current_name)),
            )
            .set(bets::competitor_name.eq(&competitor.name))
            .execute(self.conn)?;
        }
        Ok(())
    }

    fn delete_competitor(&mut self, race: &str, name: &str) -> Result<bool> {
        let deleted =
            diesel::delete(competitors::table.find((name, race))).execute(self.conn)?;
        if deleted == 0 {
            return Ok(false);
        }
        diesel::delete(
            bets::table
                .filter(bets::race_name.eq(race))
                .filter(bets::competitor_name.eq(name)),
        )
        .execute(self.conn)?;
        Ok(true)
    }

    fn find_bettor(&mut self, name: &str) -> Result<Option<Bettor>> {
        let row: Option<BettorRow> = bettors::table
            .find(name)
            .select(BettorRow::as_select())
            .first(self.conn)
            .optional()?;

        Ok(row.map(|r| Bettor::new(r.name)))
    }

    fn list_bettors(&mut self) -> Result<Vec<Bettor>> {
        let rows: Vec<BettorRow> = bettors::table
            .order(bettors::name.asc())
            .select(BettorRow::as_select())
            .load(self.conn)?;

        Ok(rows.into_iter().map(|r| Bettor::new(r.name)).collect())
    }

    fn insert_bettor(&mut self, bettor: &Bettor) -> Result<()> {
        diesel::insert_into(bettors::table)
            .values(&BettorRow {
                name: bettor.name.clone(),
            })
            .execute(self.conn)?;
        Ok(())
    }

    fn rename_bettor(&mut self, current_name: &str, new_name: &str) -> Result<bool> {
        let renamed = diesel::update(bettors::table.find(current_name))
            .set(bettors::name.eq(new_name))
            .execute(self.conn)?;
        if renamed == 0 {
            return Ok(false);
        }
        diesel::update(bets::table.filter(bets::bettor_name.eq(current_name)))
            .set(bets::bettor_name.eq(new_name))
            .execute(self.conn)?;
        Ok(true)
    }

    fn delete_bettor(&mut self, name: &str) -> Result<bool> {
        diesel::delete(bets::table.filter(bets::bettor_name.eq(name))).execute(self.conn)?;
        let deleted = diesel::delete(bettors::table.find(name)).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn insert_bet(&mut self, bet: NewBet) -> Result<Bet> {
        diesel::insert_into(bets::table)
            .values(&NewBetRow {
                amount: bet.amount.to_string(),
                payout: Decimal::ZERO.to_string(),
                bettor_name: bet.bettor.clone(),
                race_name: bet.race.clone(),
                competitor_name: bet.competitor.clone(),
            })
            .execute(self.conn)?;

        // AUTOINCREMENT ids only grow, and this transaction is the only writer.
        let id: Option<i32> = bets::table.select(max(bets::id)).first(self.conn)?;
        let id = id.ok_or_else(|| Error::Database("inserted bet has no id".to_string()))?;
        Ok(Bet::from_new(BetId::new(id), bet))
    }

    fn race_bets(&mut self, race: &str) -> Result<Vec<Bet>> {
        let rows: Vec<BetRow> = bets::table
            .filter(bets::race_name.eq(race))
            .order((bets::bettor_name.asc(), bets::id.asc()))
            .select(BetRow::as_select())
            .load(self.conn)?;

        rows.into_iter().map(bet_from_row).collect()
    }

    fn update_bet(&mut self, bet: &Bet) -> Result<()> {
        diesel::update(bets::table.find(bet.id.get()))
            .set((
                bets::amount.eq(bet.amount.to_string()),
                bets::payout.eq(bet.payout.to_string()),
                bets::bettor_name.eq(&bet.bettor),
                bets::race_name.eq(&bet.race),
                bets::competitor_name.eq(&bet.competitor),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    fn delete_bet(&mut self, id: BetId) -> Result<bool> {
        let deleted = diesel::delete(bets::table.find(id.get())).execute(self.conn)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup_store() -> SqliteStore {
        SqliteStore::open(":memory:").expect("open in-memory store")
    }

    fn seed(store: &SqliteStore) {
        store
            .transaction(|repo| {
                repo.insert_race(&Race::new("derby"))?;
                for (name, p) in [("bolt", dec!(0.25)), ("flash", dec!(0.75))] {
                    repo.insert_competitor(&Competitor::new(
                        name,
                        "derby",
                        Probability::try_new(p)?,
                    ))?;
                }
                repo.insert_bettor(&Bettor::new("zoe"))?;
                repo.insert_bettor(&Bettor::new("ana"))?;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn race_roundtrip_keeps_competitor_order() {
        let store = setup_store();
        seed(&store);

        let race = store
            .transaction(|repo| repo.find_race("derby"))
            .unwrap()
            .unwrap();

        assert!(race.open);
        assert_eq!(race.house_profit, None);
        let names: Vec<_> = race.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["bolt", "flash"]);
        assert_eq!(race.competitors[0].probability.value(), dec!(0.25));
    }

    #[test]
    fn house_profit_survives_roundtrip() {
        let store = setup_store();
        seed(&store);

        store
            .transaction(|repo| {
                let mut race = repo.find_race("derby")?.unwrap();
                race.open = false;
                race.house_profit = Some(dec!(-12.35));
                repo.update_race(&race)
            })
            .unwrap();

        let race = store.transaction(|repo| repo.find_race("derby")).unwrap().unwrap();
        assert!(!race.open);
        assert_eq!(race.house_profit, Some(dec!(-12.35)));
    }

    #[test]
    fn bettors_listed_by_name() {
        let store = setup_store();
        seed(&store);

        let names: Vec<String> = store
            .transaction(|repo| repo.list_bettors())
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["ana", "zoe"]);
    }

    #[test]
    fn bets_sorted_by_bettor_then_id() {
        let store = setup_store();
        seed(&store);

        store
            .transaction(|repo| {
                repo.insert_bet(NewBet::try_new("zoe", "derby", dec!(5), "bolt")?)?;
                repo.insert_bet(NewBet::try_new("ana", "derby", dec!(7), "flash")?)?;
                repo.insert_bet(NewBet::try_new("ana", "derby", dec!(9), "bolt")?)?;
                Ok(())
            })
            .unwrap();

        let bets = store.transaction(|repo| repo.race_bets("derby")).unwrap();
        let summary: Vec<_> = bets.iter().map(|b| (b.bettor.as_str(), b.amount)).collect();
        assert_eq!(summary, [("ana", dec!(7)), ("ana", dec!(9)), ("zoe", dec!(5))]);
        assert!(bets[0].id < bets[1].id);
    }

    #[test]
    fn insert_bet_returns_new_id() {
        let store = setup_store();
        seed(&store);

        let first = store
            .transaction(|repo| repo.insert_bet(NewBet::try_new("ana", "derby", dec!(1), "bolt")?))
            .unwrap();
        let second = store
            .transaction(|repo| repo.insert_bet(NewBet::try_new("ana", "derby", dec!(2), "bolt")?))
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(second.amount, dec!(2));
    }

    #[test]
    fn rollback_discards_all_writes() {
        let store = setup_store();

        let result: Result<()> = store.transaction(|repo| {
            repo.insert_race(&Race::new("ghost"))?;
            repo.insert_bettor(&Bettor::new("casper"))?;
            Err(Error::Database("abort".into()))
        });

        assert!(result.is_err());
        let (race, bettor) = store
            .transaction(|repo| Ok((repo.find_race("ghost")?, repo.find_bettor("casper")?)))
            .unwrap();
        assert!(race.is_none());
        assert!(bettor.is_none());
    }

    #[test]
    fn duplicate_race_insert_is_a_database_error() {
        let store = setup_store();
        seed(&store);

        let result = store.transaction(|repo| repo.insert_race(&Race::new("derby")));
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[test]
    fn renaming_competitor_moves_its_bets() {
        let store = setup_store();
        seed(&store);

        store
            .transaction(|repo| {
                repo.insert_bet(NewBet::try_new("ana", "derby", dec!(3), "bolt")?)?;
                let mut bolt = repo.find_competitor("bolt")?.unwrap();
                bolt.name = "lightning".to_string();
                repo.update_competitor("bolt", &bolt)
            })
            .unwrap();

        let (old, bets) = store
            .transaction(|repo| Ok((repo.find_competitor("bolt")?, repo.race_bets("derby")?)))
            .unwrap();
        assert!(old.is_none());
        assert_eq!(bets[0].competitor, "lightning");

        let race = store.transaction(|repo| repo.find_race("derby")).unwrap().unwrap();
        assert_eq!(race.competitors[0].name, "lightning");
    }

    #[test]
    fn delete_bettor_cascades_to_bets() {
        let store = setup_store();
        seed(&store);

        store
            .transaction(|repo| {
                repo.insert_bet(NewBet::try_new("ana", "derby", dec!(3), "bolt")?)?;
                repo.insert_bet(NewBet::try_new("zoe", "derby", dec!(4), "bolt")?)?;
                Ok(())
            })
            .unwrap();

        assert!(store.transaction(|repo| repo.delete_bettor("ana")).unwrap());
        let bets = store.transaction(|repo| repo.race_bets("derby")).unwrap();
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].bettor, "zoe");
    }
}
