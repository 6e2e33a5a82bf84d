//! Configuration management for SensAI.
//!
//! Loads configuration from ${SENSAI_HOME}/config.toml with sensible defaults,
//! then applies environment overrides.
//!
//! The two backend base URLs are separate settings and never substitute for
//! each other: `backend_url` is the server-side address used by the auth
//! bridge, `public_backend_url` is the address the wizard talks to directly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the auth bridge base URL.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Environment variable overriding the wizard base URL.
pub const PUBLIC_BACKEND_URL_ENV: &str = "PUBLIC_BACKEND_URL";

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "SENSAI_LOG";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for SensAI configuration and data directories.
    //!
    //! SENSAI_HOME resolution order:
    //! 1. SENSAI_HOME environment variable (if set)
    //! 2. ~/.config/sensai (default)
    //! 3. ./.sensai when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the SensAI home directory.
    pub fn sensai_home() -> PathBuf {
        if let Ok(home) = std::env::var("SENSAI_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".sensai"),
            |h| h.join(".config").join("sensai"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        sensai_home().join("config.toml")
    }

    /// Returns the default log file used by the TUI.
    pub fn default_log_path() -> PathBuf {
        sensai_home().join("logs").join("sensai.log")
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL for the auth bridge (`/auth/login`).
    pub backend_url: String,
    /// Base URL for wizard submissions and assessment follow-ups.
    pub public_backend_url: String,
    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
    /// Log file for the TUI (defaults to ${SENSAI_HOME}/logs/sensai.log).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            public_backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:8001";
    pub const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Loads configuration from the default path, then applies env overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies environment overrides using the given lookup.
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// wipe a configured URL.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(BACKEND_URL_ENV) {
            self.backend_url = url;
        }
        if let Some(url) = non_empty(PUBLIC_BACKEND_URL_ENV) {
            self.public_backend_url = url;
        }
        if let Some(level) = non_empty(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
    }

    /// Log file path for the TUI.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(paths::default_log_path)
    }

    /// Writes the commented default config to `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
