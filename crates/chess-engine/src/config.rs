//! Engine configuration loaded from TOML.
//!
//! Every field has a default, so an empty or missing file yields a usable
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deepest search the configuration accepts.
pub const MAX_DEPTH: u32 = 10;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Search depth outside `1..=MAX_DEPTH`.
    #[error("Invalid search depth {0}: expected 1 to {max}", max = MAX_DEPTH)]
    InvalidDepth(u32),
}

/// Search settings.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root. Defaults to 3.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Adds the mobility term to the evaluation. Defaults to false.
    #[serde(default)]
    pub mobility: bool,
}

fn default_depth() -> u32 {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: default_depth(),
            mobility: false,
        }
    }
}

impl SearchConfig {
    /// Checks that the depth is within `1..=MAX_DEPTH`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (1..=MAX_DEPTH).contains(&self.depth) {
            Ok(())
        } else {
            Err(ConfigError::InvalidDepth(self.depth))
        }
    }
}

/// Settings for automated play.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Name printed in game reports. Defaults to "negamax".
    #[serde(default = "default_name")]
    pub name: String,
    /// Self-play stops after this many plies. Defaults to 200.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
}

fn default_name() -> String {
    "negamax".to_string()
}

fn default_max_plies() -> u32 {
    200
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            name: default_name(),
            max_plies: default_max_plies(),
        }
    }
}

/// Top-level engine configuration.
///
/// Uses `engine.toml` in the current directory by default.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

impl EngineConfig {
    /// Loads the configuration from [`Self::config_path()`], or the defaults
    /// if that file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if the file contains invalid TOML, or
    /// [`ConfigError::InvalidDepth`] if the search depth is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads the configuration from `path`, or the defaults if it does not
    /// exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.search.validate()?;
        Ok(config)
    }

    /// Returns the path to the default configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("engine.toml")
    }
}
