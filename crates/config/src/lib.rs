//! Configuration loading, validation, and management for PairBot.
//!
//! Loads configuration from `~/.pairbot/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use pairbot_core::{ChannelId, GroupMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.pairbot/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Channel whose members are paired up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing_channel: Option<String>,

    /// Channel whose members are put into larger groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_channel: Option<String>,

    /// Group sizes
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Slack Web API settings
    #[serde(default)]
    pub slack: SlackConfig,

    /// Scheduled grouping runs
    #[serde(default)]
    pub routines: Vec<RoutineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Chunk size in pairing mode; a trailing group below it is merged.
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,

    /// Chunk size in general grouping mode.
    #[serde(default = "default_max_group_size")]
    pub max_group_size: usize,
}

fn default_min_group_size() -> usize {
    2
}
fn default_max_group_size() -> usize {
    4
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_group_size: default_min_group_size(),
            max_group_size: default_max_group_size(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token (xoxb-...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://slack.com/api".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &redact(&self.bot_token))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

/// Configuration for a scheduled grouping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineConfig {
    /// Unique name for this routine
    pub name: String,

    /// Cron expression (5-field: minute hour dom month dow)
    pub schedule: String,

    /// Pairing or general grouping
    pub mode: GroupMode,

    /// Channel override; defaults to the mode's configured channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Whether this routine is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from the default path (~/.pairbot/config.toml).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_dir().join("config.toml"))
    }

    /// Load from `path`, then apply process environment overrides.
    ///
    /// Recognized variables:
    /// - `SLACK_BOT_TOKEN`
    /// - `PAIRING_CHANNEL`
    /// - `GROUPS_CHANNEL`
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment-style lookups. Blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("SLACK_BOT_TOKEN") {
            self.slack.bot_token = Some(token);
        }
        if let Some(channel) = get("PAIRING_CHANNEL") {
            self.pairing_channel = Some(channel);
        }
        if let Some(channel) = get("GROUPS_CHANNEL") {
            self.groups_channel = Some(channel);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".pairbot")
    }

    /// The channel configured for `mode`.
    pub fn channel_for(&self, mode: GroupMode) -> Result<ChannelId, ConfigError> {
        let channel = match mode {
            GroupMode::Pairing => self.pairing_channel.as_deref(),
            GroupMode::Group => self.groups_channel.as_deref(),
        };
        channel
            .map(ChannelId::from)
            .ok_or(ConfigError::MissingChannel(mode))
    }

    /// The channel a routine runs against: its own override, else the mode's channel.
    pub fn routine_channel(&self, routine: &RoutineConfig) -> Result<ChannelId, ConfigError> {
        match &routine.channel {
            Some(channel) => Ok(ChannelId::from(channel.as_str())),
            None => self.channel_for(routine.mode),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.grouping.min_group_size < 2 {
            return Err(ConfigError::ValidationError(
                "grouping.min_group_size must be at least 2".into(),
            ));
        }

        if self.grouping.max_group_size < self.grouping.min_group_size {
            return Err(ConfigError::ValidationError(
                "grouping.max_group_size must be >= grouping.min_group_size".into(),
            ));
        }

        if self.slack.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "slack.timeout_secs must be > 0".into(),
            ));
        }

        let mut names: Vec<&str> = self.routines.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate routine name '{}'",
                pair[0]
            )));
        }

        Ok(())
    }

    /// Check if a bot token is available (from config or environment).
    pub fn has_bot_token(&self) -> bool {
        self.slack.bot_token.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self {
            routines: vec![RoutineConfig {
                name: "monthly_pairs".into(),
                schedule: "0 9 1-7 * 1".into(),
                mode: GroupMode::Pairing,
                channel: None,
                enabled: true,
            }],
            ..Self::default()
        };
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pairing_channel: None,
            groups_channel: None,
            grouping: GroupingConfig::default(),
            slack: SlackConfig::default(),
            routines: vec![],
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No channel configured for {0} mode")]
    MissingChannel(GroupMode),
}

impl From<ConfigError> for pairbot_core::Error {
    fn from(err: ConfigError) -> Self {
        pairbot_core::Error::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.grouping.min_group_size, 2);
        assert_eq!(config.grouping.max_group_size, 4);
        assert_eq!(config.slack.api_url, "https://slack.com/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig {
            pairing_channel: Some("C0PAIRS".into()),
            ..AppConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.pairing_channel.as_deref(), Some("C0PAIRS"));
        assert_eq!(parsed.grouping.max_group_size, config.grouping.max_group_size);
    }

    #[test]
    fn undersized_min_group_rejected() {
        let config = AppConfig {
            grouping: GroupingConfig {
                min_group_size: 1,
                max_group_size: 4,
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_group_sizes_rejected() {
        let config = AppConfig {
            grouping: GroupingConfig {
                min_group_size: 4,
                max_group_size: 2,
            },
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_group_size"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert!(result.unwrap().pairing_channel.is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
pairing_channel = "C0PAIRS"

[grouping]
max_group_size = 5

[slack]
bot_token = "xoxb-test"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.pairing_channel.as_deref(), Some("C0PAIRS"));
        assert_eq!(config.grouping.min_group_size, 2);
        assert_eq!(config.grouping.max_group_size, 5);
        assert!(config.has_bot_token());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pairing_channel = [").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let env: HashMap<&str, &str> = [
            ("PAIRING_CHANNEL", "C0ENV"),
            ("SLACK_BOT_TOKEN", "xoxb-env"),
            ("GROUPS_CHANNEL", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig {
            pairing_channel: Some("C0FILE".into()),
            groups_channel: Some("C0GROUPS".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.pairing_channel.as_deref(), Some("C0ENV"));
        assert_eq!(config.slack.bot_token.as_deref(), Some("xoxb-env"));
        // blank values do not clobber the file setting
        assert_eq!(config.groups_channel.as_deref(), Some("C0GROUPS"));
    }

    #[test]
    fn channel_for_mode() {
        let config = AppConfig {
            pairing_channel: Some("C0PAIRS".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.channel_for(GroupMode::Pairing).unwrap().0, "C0PAIRS");
        assert!(matches!(
            config.channel_for(GroupMode::Group),
            Err(ConfigError::MissingChannel(GroupMode::Group))
        ));
    }

    #[test]
    fn routine_config_parsing() {
        let toml_str = r#"
groups_channel = "C0GROUPS"

[[routines]]
name = "monthly_pairs"
schedule = "0 9 1-7 * 1"
mode = "pairing"
channel = "C0OTHER"

[[routines]]
name = "biweekly_groups"
schedule = "0 9 * * 1"
mode = "group"
enabled = false
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.routines.len(), 2);
        assert_eq!(config.routines[0].mode, GroupMode::Pairing);
        assert!(config.routines[0].enabled);
        assert_eq!(config.routine_channel(&config.routines[0]).unwrap().0, "C0OTHER");

        assert_eq!(config.routines[1].mode, GroupMode::Group);
        assert!(!config.routines[1].enabled);
        assert_eq!(config.routine_channel(&config.routines[1]).unwrap().0, "C0GROUPS");
    }

    #[test]
    fn duplicate_routine_names_rejected() {
        let routine = RoutineConfig {
            name: "pairs".into(),
            schedule: "0 9 * * 1".into(),
            mode: GroupMode::Pairing,
            channel: None,
            enabled: true,
        };
        let config = AppConfig {
            routines: vec![routine.clone(), routine],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("min_group_size = 2"));
        assert!(toml_str.contains("monthly_pairs"));
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.routines.len(), 1);
    }

    #[test]
    fn bot_token_is_redacted_in_debug() {
        let config = SlackConfig {
            bot_token: Some("xoxb-secret".into()),
            ..SlackConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("xoxb-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
