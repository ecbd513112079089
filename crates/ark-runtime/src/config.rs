//! Runtime configuration file.
//!
//! ```toml
//! [program]
//! max_governments = 10
//! max_trades = 10
//! max_services = 10
//! registration_policy = "open"
//! government_duplicates = "reject"
//! points_per_poll = 1
//!
//! [clock]
//! fixed_timestamp = 1700000000
//! ```
//!
//! Every key is optional. Without `[clock] fixed_timestamp` the wall clock
//! is used.

use ark_program::config::{ArkConfig, ConfigError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Parsed runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Program configuration.
    pub program: ArkConfig,
    /// Clock selection.
    pub clock: ClockConfig,
}

/// `[clock]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Stamp every record with this time instead of the wall clock.
    pub fixed_timestamp: Option<i64>,
}

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// File I/O error.
    #[error("failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parse error.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Parsed, but not usable.
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

impl RuntimeConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigLoadError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.program.validate()?;
        Ok(config)
    }
}
