//! Composition root: wires configuration to the SQLite-backed pool.

use std::path::Path;

use tracing::info;

use crate::adapter::outbound::sqlite::store::SqliteStore;
use crate::application::pool::BettingPool;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

/// Open the pool of the active profile.
///
/// Relative database paths resolve against `base_dir`; missing parent
/// directories are created and the schema is migrated on first use.
///
/// # Errors
/// Returns an error if the directory cannot be created or the database
/// cannot be opened.
pub fn open_pool(config: &Config, base_dir: &Path) -> Result<BettingPool<SqliteStore>> {
    let path = config.database_path(base_dir);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let url = path
        .to_str()
        .ok_or_else(|| Error::Connection(format!("non UTF-8 database path: {}", path.display())))?;
    let store = SqliteStore::open(url)?;

    info!(profile = %config.profile, database = url, "pool opened");
    Ok(BettingPool::new(store))
}
