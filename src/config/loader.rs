use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::ParseError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The debounce delay is positive
    /// - The scroll-back offset is a fraction between 0 and 1
    /// - Breakpoints are strictly increasing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form.debounce_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "form.debounce_ms must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.pagination.offset) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "pagination.offset must be within 0.0..=1.0, got {}",
                    self.pagination.offset
                ),
            });
        }

        self.responsive
            .breakpoints
            .validate()
            .map_err(|e| ConfigError::ValidationError {
                message: e.to_string(),
            })
    }
}
