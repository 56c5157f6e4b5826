//! # Configuration
//!
//! Quest-Bot reads an optional TOML file (default `questbot.toml`). Every
//! section and key has a default, so an empty or missing file is valid.
//!
//! ```toml
//! [storage]
//! quest_dir = "quest_logs"
//!
//! [logging]
//! level = "warn"        # -v / -vv raise this to debug / trace
//! file = "questbot.log"
//!
//! [handler]
//! seed = 42              # reproducible quest content
//! id_strategy = "store"  # "session" restarts ids at 001 every run
//! ```
//!
//! ```rust,no_run
//! use questbot::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     Config::create_default("questbot.toml")?;
//!     let config = Config::load("questbot.toml")?;
//!     println!("Quest logs live in {}", config.storage.quest_dir);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "questbot.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub handler: HandlerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<quest_id>.json` records and narrative exports.
    #[serde(default = "default_quest_dir")]
    pub quest_dir: String,
}

fn default_quest_dir() -> String {
    "quest_logs".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quest_dir: default_quest_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Fixed RNG seed; unset means entropy-seeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

/// How quest identifiers are allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Counter local to the running process.
    Session,
    /// Continue after the highest id already in the quest directory.
    #[default]
    Store,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub fn create_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }
}
