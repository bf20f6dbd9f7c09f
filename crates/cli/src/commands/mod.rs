//! Subcommand implementations.

pub mod daemon;
pub mod doctor;
pub mod onboard;
pub mod preview;
pub mod run;

use pairbot_config::AppConfig;
use std::path::{Path, PathBuf};

/// Where the config lives: `--config` if given, else the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load config (file + environment overrides).
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let path = config_path(explicit);
    AppConfig::load_with_env(&path).map_err(|e| format!("Failed to load config: {e}").into())
}
