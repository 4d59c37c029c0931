//! Client configuration: where the API token and endpoint come from.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::client::DEFAULT_BASE_URL;

pub const TOKEN_ENV: &str = "TODOIST_API_TOKEN";
pub const BASE_URL_ENV: &str = "TODOIST_API_URL";

/// Supplies the API token when a client is requested without one.
pub trait TokenSource: Send + Sync {
    fn api_token(&self) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Read `TODOIST_API_TOKEN` and `TODOIST_API_URL`; unset variables keep defaults.
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var(TOKEN_ENV).ok(),
            base_url: std::env::var(BASE_URL_ENV).unwrap_or_else(|_| default_base_url()),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

impl TokenSource for Config {
    fn api_token(&self) -> Option<String> {
        self.api_token.clone().filter(|t| !t.trim().is_empty())
    }
}
