use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use eporra::adapter::inbound::cli::command::{Cli, ProfileArg};
use eporra::adapter::inbound::cli::diagnostic::CliError;
use eporra::adapter::inbound::cli::output::{self, OutputConfig};
use eporra::adapter::inbound::cli::{dispatch, paths};
use eporra::error::Result;
use eporra::infrastructure::bootstrap::open_pool;
use eporra::infrastructure::config::profile::Profile;
use eporra::infrastructure::config::settings::Config;
use tracing::debug;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config_path = cli.config.clone().unwrap_or_else(paths::default_config);
    let config = match load_config(&cli, &config_path) {
        Ok(config) => config,
        Err(e) => {
            report(CliError::config(&config_path, &e));
            return ExitCode::FAILURE;
        }
    };
    config.init_logging();
    debug!(config = %config_path.display(), profile = %config.profile, "configuration loaded");

    let pool = match open_pool(&config, &paths::data_dir(&config_path)) {
        Ok(pool) => pool,
        Err(e) => {
            report(CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    match dispatch::execute(&pool, &cli.command) {
        Ok(code) => code,
        Err(e) => {
            report(CliError::from(e));
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli, path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)?.with_env_overrides()?;

    if let Some(profile) = cli.profile {
        config.profile = match profile {
            ProfileArg::Production => Profile::Production,
            ProfileArg::Test => Profile::Test,
        };
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "info".into(),
        _ => config.logging.level = "debug".into(),
    }
    Ok(config)
}

fn report(error: CliError) {
    eprintln!("{:?}", miette::Report::new(error));
}
