//! Engine configuration with TOML file support.

use ballot_types::{VoterId, Weight, WeightTable};
use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for an engine instance.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The single identity allowed to manage voters, weights, and start/stop.
    #[serde(default = "default_administrator")]
    pub administrator: VoterId,

    /// Display name the administrator is registered under.
    #[serde(default = "default_administrator_name")]
    pub administrator_name: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Initial weights. When absent the store's table (default 1 each) is left alone.
    #[serde(default)]
    pub weights: Option<WeightsConfig>,
}

/// `[weights]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_weight")]
    pub director: Weight,
    #[serde(default = "default_weight")]
    pub teacher: Weight,
    #[serde(default = "default_weight")]
    pub student: Weight,
}

impl From<WeightsConfig> for WeightTable {
    fn from(w: WeightsConfig) -> Self {
        WeightTable::new(w.director, w.teacher, w.student)
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_administrator() -> VoterId {
    VoterId::new("admin")
}

fn default_administrator_name() -> String {
    "Administrator".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_weight() -> Weight {
    WeightTable::DEFAULT_WEIGHT
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// A default config with the given administrator identity.
    pub fn with_administrator(administrator: VoterId) -> Self {
        Self {
            administrator,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.administrator.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("administrator must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            administrator: default_administrator(),
            administrator_name: default_administrator_name(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            weights: None,
        }
    }
}
