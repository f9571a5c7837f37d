//! Serializable dashboard configuration.
//!
//! Loaded from a TOML file; every section is optional and falls back to
//! the built-in defaults, so an empty file is a valid config.

use crate::data::CacheConfig;
use crate::domain::Period;
use crate::watchlist::{default_groups, WatchlistGroup};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub cache: CacheSettings,
    pub defaults: Defaults,
    /// Watchlist groups; the built-in groups apply when the file defines none.
    pub watchlist: Vec<WatchlistGroup>,
}

/// Quote cache tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub capacity: usize,
}

/// Initial view when the user has not chosen anything yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub ticker: String,
    pub period: Period,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            defaults: Defaults::default(),
            watchlist: default_groups(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 30,
            capacity: 64,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            ticker: "GOTO.JK".to_string(),
            period: Period::OneMonth,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache.ttl_secs),
            capacity: self.cache.capacity,
        }
    }
}
