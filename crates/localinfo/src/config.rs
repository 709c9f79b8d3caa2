//! Configuration file support for localinfo.
//!
//! Loads configuration from `localinfo.toml` in a directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The config file name
pub const CONFIG_FILE_NAME: &str = "localinfo.toml";

/// Bound on `git fetch` unless configured otherwise
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the query layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalInfoConfig {
    /// Git executable to run
    pub git_binary: PathBuf,
    /// How long `git fetch` may run before it is killed, e.g. `"30s"`
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
    /// Bound applied to every other command (None = no limit)
    #[serde(with = "humantime_serde")]
    pub command_timeout: Option<Duration>,
    /// Remote whose URL identifies the repository
    pub preferred_remote: String,
}

impl Default for LocalInfoConfig {
    fn default() -> Self {
        Self {
            git_binary: PathBuf::from("git"),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            command_timeout: None,
            preferred_remote: "origin".to_string(),
        }
    }
}

impl LocalInfoConfig {
    /// Load configuration from `dir`.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Like [`load`](Self::load), falling back to defaults when no file exists
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        Ok(Self::load(dir)?.unwrap_or_default())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
