//! Configuration file support for pyreqs
//!
//! Reads configuration from `~/.config/pyreqs/config.json`:
//!
//! ```json
//! {
//!   "index_url": "https://pypi.org/pypi",
//!   "timeout_secs": 2,
//!   "ignore_dirs": ["build", "node_modules"],
//!   "stdlib_file": "/etc/pyreqs/stdlib",
//!   "mapping_file": "/etc/pyreqs/mapping",
//!   "overrides": {
//!     "torch": "torch-cuda"
//!   }
//! }
//! ```

use crate::python::{DEFAULT_INDEX_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine config directory. HOME environment variable not set.")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package index JSON API base URL
    pub index_url: String,

    /// Per-request timeout for index lookups
    pub timeout_secs: u64,

    /// Directory names skipped in addition to the built-in ones
    pub ignore_dirs: Vec<String>,

    /// Replacement for the built-in standard-library table
    pub stdlib_file: Option<PathBuf>,

    /// Replacement for the built-in import-name to distribution table
    pub mapping_file: Option<PathBuf>,

    /// Import names always rewritten to a distribution, beating the mapping table
    pub overrides: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            ignore_dirs: Vec::new(),
            stdlib_file: None,
            mapping_file: None,
            overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default path or return defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from `path`, defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Returns the config file path: `~/.config/pyreqs/config.json`
pub fn config_path() -> Result<PathBuf, ConfigError> {
    // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".config"))
                .unwrap_or_default()
        });

    if config_base.as_os_str().is_empty() {
        return Err(ConfigError::NoConfigDir);
    }

    Ok(config_base.join("pyreqs").join("config.json"))
}
