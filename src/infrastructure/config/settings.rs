//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct. Configuration is read from a TOML
//! file; a missing file yields the defaults. `EPORRA_PROFILE` and
//! `EPORRA_DATABASE` override the file when set.
//!
//! ```toml
//! profile = "production"
//!
//! [database]
//! production = "eporra.sqlite"
//! test = "eporra_test.sqlite"
//!
//! [logging]
//! level = "warn"
//! format = "pretty"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use eporra::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::profile::Profile;
use crate::error::{ConfigError, Result};

/// Environment variable selecting the profile.
pub const PROFILE_ENV: &str = "EPORRA_PROFILE";
/// Environment variable replacing the active profile's database path.
pub const DATABASE_ENV: &str = "EPORRA_DATABASE";

/// Database file per profile.
///
/// Relative paths are resolved against the directory holding the
/// configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_production_database")]
    pub production: String,
    #[serde(default = "default_test_database")]
    pub test: String,
}

fn default_production_database() -> String {
    "eporra.sqlite".to_string()
}

fn default_test_database() -> String {
    "eporra_test.sqlite".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            production: default_production_database(),
            test: default_test_database(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Active profile. Defaults to [`Profile::Production`].
    #[serde(default)]
    pub profile: Profile,

    /// Database file per profile.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate TOML content.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] or a validation error.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::ReadFile`] when the file cannot be read, then
    /// whatever [`Config::parse_toml`] returns.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    /// Same as [`Config::load`] for a file that exists.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `EPORRA_PROFILE` and `EPORRA_DATABASE`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unknown profile or an
    /// empty database path.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var(PROFILE_ENV) {
            self.profile = raw.parse()?;
        }
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            match self.profile {
                Profile::Production => self.database.production = path,
                Profile::Test => self.database.test = path,
            }
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.database.production.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.production",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.database.test.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.test",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected pretty or json, got `{}`", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Database path of the active profile, as configured.
    #[must_use]
    pub fn database(&self) -> &str {
        match self.profile {
            Profile::Production => &self.database.production,
            Profile::Test => &self.database.test,
        }
    }

    /// Database path of the active profile, resolved against `base_dir`.
    #[must_use]
    pub fn database_path(&self, base_dir: &Path) -> PathBuf {
        let path = Path::new(self.database());
        if path.is_absolute() || self.database() == ":memory:" {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.profile, Profile::Production);
        assert_eq!(config.database(), "eporra.sqlite");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_profile_selects_test_database() {
        let config = Config::parse_toml(r#"profile = "test""#).unwrap();
        assert_eq!(config.database(), "eporra_test.sqlite");
    }

    #[test]
    fn relative_database_resolves_against_base_dir() {
        let config = Config::default();
        let path = config.database_path(Path::new("/srv/pool"));
        assert_eq!(path, PathBuf::from("/srv/pool/eporra.sqlite"));
    }

    #[test]
    fn absolute_database_is_kept() {
        let config = Config::parse_toml(
            r#"
[database]
production = "/var/lib/eporra/pool.sqlite"
"#,
        )
        .unwrap();
        assert_eq!(
            config.database_path(Path::new("/elsewhere")),
            PathBuf::from("/var/lib/eporra/pool.sqlite")
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml(
            r#"
[logging]
format = "xml"
"#,
        );
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }
}
