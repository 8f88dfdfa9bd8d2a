//! Path utilities for eporra.
//!
//! Everything lives under `~/.eporra/` unless `--config` points elsewhere:
//! - `~/.eporra/config.toml` - configuration
//! - `~/.eporra/eporra.sqlite` - production pool
//! - `~/.eporra/eporra_test.sqlite` - test pool

use std::path::{Path, PathBuf};

/// Returns the eporra home directory (`~/.eporra/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".eporra")
}

/// Returns the default config file path (`~/.eporra/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Directory relative database paths resolve against: the one holding the
/// config file.
pub fn data_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
