//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory. Missing files
//! and missing keys fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::quests::catalog::DAILY_QUEST_COUNT;
use crate::users::types::BASE_STAT;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Database settings
    pub database: DatabaseSettings,
    /// Quest generation settings
    pub quests: QuestSettings,
    /// Leveling rules
    pub progression: ProgressionRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            log_filter: "info".to_string(),
            database: DatabaseSettings::default(),
            quests: QuestSettings::default(),
            progression: ProgressionRules::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database.file_name)
    }
}

/// Database-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// File name inside the data directory
    pub file_name: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            file_name: "levelup.db".to_string(),
        }
    }
}

/// Quest generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestSettings {
    /// Daily quests handed out per generation cycle
    pub daily_count: usize,
    /// Hours until a generated quest expires
    pub lifetime_hours: i64,
}

impl Default for QuestSettings {
    fn default() -> Self {
        Self {
            daily_count: DAILY_QUEST_COUNT,
            lifetime_hours: 24,
        }
    }
}

impl QuestSettings {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::hours(self.lifetime_hours)
    }
}

/// Leveling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    /// Amount added to every stat on level-up
    pub stat_gain_per_level: u32,
    /// Starting value of every stat for new users
    pub base_stat: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            stat_gain_per_level: 2,
            base_stat: BASE_STAT,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "levelup", "LevelUp")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path(), get_data_dir())
}

/// Load configuration from `path`, using `data_dir` for data files.
pub fn load_config_from(path: &Path, data_dir: PathBuf) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if config.progression.base_stat < BASE_STAT {
        return Err(ConfigError::InvalidValue(format!(
            "progression.base_stat must be at least {}, got {}",
            BASE_STAT, config.progression.base_stat
        )));
    }

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
