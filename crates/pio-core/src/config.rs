//! Configuration management for personium auth plugins.
//!
//! Supports defaults, serde-based files, and environment variable overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming a directory that overrides bundled message resources.
pub const ENV_RESOURCE_DIR: &str = "PIO_RESOURCE_DIR";

/// Environment variable holding the default log filter.
pub const ENV_LOG_LEVEL: &str = "PIO_LOG_LEVEL";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Message catalog configuration.
    pub catalog: CatalogConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Message catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding replacement message resources.
    ///
    /// When unset, plugins use the resources compiled into them.
    pub resource_dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration from defaults and process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Applies overrides from a variable lookup on top of the current values.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = lookup(ENV_RESOURCE_DIR) {
            self.catalog.resource_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }

    /// Validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Config`] if the resource directory does not exist or
    /// the log level is blank.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.catalog.resource_dir {
            if !dir.is_dir() {
                return Err(Error::Config(format!(
                    "resource directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("log level must not be empty".to_string()));
        }
        Ok(())
    }
}
