//! Miette diagnostics for CLI error presentation.
//!
//! Every failure the binary reports goes through [`CliError`], which picks an
//! error code and a help line from the underlying [`Error`].

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error as ThisError;

use crate::domain::error::DomainError;
use crate::error::{ConfigError, Entity, Error};

/// Error reported by the `eporra` binary.
#[derive(Debug, ThisError, Diagnostic)]
pub enum CliError {
    /// Input rejected by the pool rules.
    #[error("{message}")]
    #[diagnostic(code(eporra::invalid))]
    Invalid {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A referenced record does not exist.
    #[error("{message}")]
    #[diagnostic(code(eporra::not_found))]
    NotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The configuration file could not be used.
    #[error("{message}")]
    #[diagnostic(code(eporra::config))]
    Config {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: Option<SourceSpan>,
        #[help]
        help: Option<String>,
    },

    /// The database failed underneath the pool.
    #[error("{message}")]
    #[diagnostic(
        code(eporra::storage),
        help("check that the database file is readable and writable")
    )]
    Storage { message: String },
}

impl CliError {
    /// Build a configuration diagnostic, pointing into the file when the
    /// parser reported a location.
    #[must_use]
    pub fn config(path: &Path, error: &Error) -> Self {
        let src = std::fs::read_to_string(path).unwrap_or_default();
        let span = match error {
            Error::Config(ConfigError::Parse(e)) => e
                .span()
                .map(|range| SourceSpan::from((range.start, range.len()))),
            _ => None,
        };
        Self::Config {
            message: format!("{}: {error}", path.display()),
            src,
            span,
            help: Some("see `[database]` and `[logging]` in the configuration reference".into()),
        }
    }
}

fn domain_help(error: &DomainError) -> Option<String> {
    let help = match error {
        DomainError::ProbabilitiesDoNotSumToOne { .. } => {
            "the probabilities of all competitors must add up to exactly 1"
        }
        DomainError::ProbabilityOutOfRange { .. } | DomainError::ProbabilityNotNumeric { .. } => {
            "use a decimal strictly between 0 and 1, e.g. 0.25"
        }
        DomainError::MalformedCompetitorChange { .. } => {
            "write competitors as NAME=PROB or existing:NAME=PROB"
        }
        DomainError::RaceClosed { .. } | DomainError::RaceAlreadyClosed { .. } => {
            "a settled race cannot be changed"
        }
        DomainError::DuplicateRace { .. } => "use `race save --existing` to edit it",
        DomainError::NumericOverflow { .. } => "decimals hold at most 28 significant digits",
        _ => return None,
    };
    Some(help.to_string())
}

fn not_found_help(entity: Entity) -> String {
    let command = match entity {
        Entity::Race => "eporra race list",
        Entity::Competitor => "eporra race competitors <race>",
        Entity::Bettor => "eporra bettor list",
        Entity::Bet => "eporra race bets <race>",
    };
    format!("run `{command}` to see what exists")
}

impl From<Error> for CliError {
    fn from(error: Error) -> Self {
        match error {
            Error::Domain(e) => Self::Invalid {
                help: domain_help(&e),
                message: e.to_string(),
            },
            Error::NotFound { entity, name } => Self::NotFound {
                message: format!("{entity} not found: {name}"),
                help: Some(not_found_help(entity)),
            },
            Error::Config(e) => Self::Config {
                message: e.to_string(),
                src: String::new(),
                span: None,
                help: None,
            },
            other => Self::Storage {
                message: other.to_string(),
            },
        }
    }
}
