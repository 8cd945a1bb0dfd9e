// ABOUTME: Configuration management for assessment-wizard
// Handles storage location, logging, and UI preferences loaded from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::FileStore;
use crate::wizard::DEFAULT_DRAFT_KEY;

/// Environment variable overriding `storage.data_dir`
pub const ENV_DATA_DIR: &str = "ASSESSMENT_WIZARD_DATA_DIR";

/// Environment variable overriding `storage.draft_key`
pub const ENV_DRAFT_KEY: &str = "ASSESSMENT_WIZARD_DRAFT_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Where drafts are persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted keys (default: ~/.assessment-wizard/data)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Key the draft is stored under
    #[serde(default = "default_draft_key")]
    pub draft_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            draft_key: default_draft_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for JSONL log files (default: ~/.assessment-wizard/logs)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// tracing-subscriber filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Event loop tick in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// How long toasts stay visible
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,

    /// Show the key help footer
    #[serde(default = "default_true")]
    pub show_help: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            toast_duration_ms: default_toast_duration(),
            show_help: default_true(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_draft_key() -> String {
    DEFAULT_DRAFT_KEY.to_string()
}

fn default_log_filter() -> String {
    "assessment_wizard=info".to_string()
}

fn default_tick_rate() -> u64 {
    250
}

fn default_toast_duration() -> u64 {
    2500
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from default locations, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_paths(&Self::get_config_paths())?;
        config.apply_env(&load_from_env());
        Ok(config)
    }

    /// Load and merge the given files in order; later files win
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in paths {
            if path.exists() {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;

                let file_config: ConfigFile = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config from {}", path.display()))?;

                config.merge(file_config);
            }
        }

        Ok(config)
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::get_user_config_dir()?;
        self.save_to(&config_dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get configuration file paths in order of increasing precedence
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. User config (~/.assessment-wizard/config/config.toml)
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        // 2. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".assessment-wizard").join("config.toml"));
        }

        paths
    }

    /// Base application directory (~/.assessment-wizard)
    pub fn base_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".assessment-wizard"))
    }

    /// Get user configuration directory
    fn get_user_config_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config"))
    }

    /// Overlay the keys a config file actually sets
    fn merge(&mut self, file: ConfigFile) {
        // Don't override version
        let ConfigFile { storage, logging, ui } = file;

        if let Some(dir) = storage.data_dir {
            self.storage.data_dir = Some(dir);
        }
        if let Some(key) = storage.draft_key {
            self.storage.draft_key = key;
        }

        if let Some(dir) = logging.directory {
            self.logging.directory = Some(dir);
        }
        if let Some(filter) = logging.filter {
            self.logging.filter = filter;
        }

        if let Some(tick) = ui.tick_rate_ms {
            self.ui.tick_rate_ms = tick;
        }
        if let Some(duration) = ui.toast_duration_ms {
            self.ui.toast_duration_ms = duration;
        }
        if let Some(show) = ui.show_help {
            self.ui.show_help = show;
        }
    }

    /// Apply `ASSESSMENT_WIZARD_*` overrides
    pub fn apply_env(&mut self, env: &HashMap<String, String>) {
        if let Some(dir) = env.get(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = env.get(ENV_DRAFT_KEY).filter(|k| !k.trim().is_empty()) {
            self.storage.draft_key = key.clone();
        }
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_root(),
        }
    }

    /// Resolved log directory
    pub fn log_dir(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            Self::base_dir()
                .map(|b| b.join("logs"))
                .unwrap_or_else(|_| PathBuf::from(".assessment-wizard/logs"))
        })
    }
}

/// One config file as written; absent keys leave earlier layers alone
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    storage: StorageFile,
    #[serde(default)]
    logging: LoggingFile,
    #[serde(default)]
    ui: UiFile,
}

#[derive(Debug, Default, Deserialize)]
struct StorageFile {
    data_dir: Option<PathBuf>,
    draft_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingFile {
    directory: Option<PathBuf>,
    filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UiFile {
    tick_rate_ms: Option<u64>,
    toast_duration_ms: Option<u64>,
    show_help: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

/// Load configuration from environment
pub fn load_from_env() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("ASSESSMENT_WIZARD_"))
        .collect()
}
