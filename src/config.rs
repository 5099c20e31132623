//! Data directory resolution and optional user configuration.
//!
//! The data directory holds `leads.json`, `backups.json` and an optional
//! `config.toml`. `REEF_DATA_DIR` overrides the platform default, which
//! keeps tests and portable setups away from the real store.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::DEFAULT_LEAD_VALUE;

pub const DATA_DIR_ENV: &str = "REEF_DATA_DIR";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Assumed revenue per closed sale, used by the dashboard.
    pub lead_value: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lead_value: DEFAULT_LEAD_VALUE,
        }
    }
}

impl Config {
    /// Load `config.toml` from the data directory; a missing file means
    /// defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Where the store lives: `$REEF_DATA_DIR` if set, else the platform data
/// directory, else a `.reef` directory relative to the working directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .map(|dir| dir.join("reef"))
        .unwrap_or_else(|| PathBuf::from(".reef"))
}
