//! Canonical test configurations.

use std::path::{Path, PathBuf};

/// Configuration selecting the test profile with its default file name.
pub const TEST_PROFILE_TOML: &str = r#"
profile = "test"

[logging]
level = "warn"
format = "pretty"
"#;

/// Write `contents` to `dir/config.toml` and return its path.
///
/// # Panics
/// If the file cannot be written.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).expect("write test config");
    path
}
