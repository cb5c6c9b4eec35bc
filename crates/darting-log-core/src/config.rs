//! Application configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "darting-log";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "darting-log.db";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runtime configuration. Missing fields take their defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite database path
    pub database_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: app_data_dir().join(DATABASE_FILE),
            log_filter: default_log_filter().to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Get the application data directory.
///
/// Falls back to the working directory on platforms without a data dir.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default log filter
pub fn default_log_filter() -> &'static str {
    "darting_log_core=info"
}
