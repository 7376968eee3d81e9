//! Configuration: defaults, TOML file, environment overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StashError};

/// Default capture server address (the server's default bind).
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8765";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Quickstash configuration (TOML)

# Base URL of the capture server.
# server_url = "http://127.0.0.1:8765"

# Request timeout in seconds.
# timeout_secs = 30
"#;

/// Client configuration.
///
/// Resolution order: built-in defaults, then the config file, then
/// `QUICKSTASH_URL` / `QUICKSTASH_TIMEOUT_SECS` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load the effective configuration.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw).map_err(|e| {
                    StashError::Config(format!("{}: {}", path.display(), e))
                })?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("QUICKSTASH_URL") {
            if !url.is_empty() {
                config.server_url = url;
            }
        }
        if let Ok(timeout) = std::env::var("QUICKSTASH_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                StashError::Config(format!("invalid QUICKSTASH_TIMEOUT_SECS: {}", timeout))
            })?;
        }

        Ok(config)
    }

    /// Path of the config file. `QUICKSTASH_CONFIG` overrides the default
    /// location under the user config directory.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("QUICKSTASH_CONFIG") {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("quickstash").join("config.toml"))
    }

    /// Write the commented default config file and return its path.
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_default(force: bool) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            StashError::Config("could not determine config directory".to_string())
        })?;
        if path.exists() && !force {
            return Err(StashError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(path)
    }
}
