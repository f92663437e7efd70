//! Tracker configuration, read from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a working setup:
//!
//! ```toml
//! storage_key = "java-quest-user"
//! data_dir = "data"
//! recent_achievement_limit = 3
//! auto_milestones = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Key the progress record is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "java-quest-user";

/// Settings for the progress store and tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Storage key of the single progress record.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory used by the file backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// How many achievements the profile's "recent" list shows.
    #[serde(default = "default_recent_achievement_limit")]
    pub recent_achievement_limit: usize,

    /// Unlock satisfied milestones automatically after a lesson is finished.
    #[serde(default = "default_auto_milestones")]
    pub auto_milestones: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_recent_achievement_limit() -> usize {
    3
}

fn default_auto_milestones() -> bool {
    true
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: default_data_dir(),
            recent_achievement_limit: default_recent_achievement_limit(),
            auto_milestones: default_auto_milestones(),
        }
    }
}

impl TrackerConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Write configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
