//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base URL, request timeout and last used email.
//!
//! Configuration is stored at `~/.config/internaide/config.json`. The
//! `INTERNAIDE_API_BASE_URL` environment variable overrides the base URL.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::auth::SessionStore;
use crate::storage::FileStore;

/// Application name used for config/data directory paths
const APP_NAME: &str = "internaide";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable naming the API base URL
pub const API_BASE_URL_ENV: &str = "INTERNAIDE_API_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub last_email: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the session file and logs.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Base URL: environment, then config file, then the local default.
    pub fn api_base_url(&self) -> String {
        Self::resolve_base_url(std::env::var(API_BASE_URL_ENV).ok(), self.api_base_url.clone())
    }

    fn resolve_base_url(from_env: Option<String>, from_config: Option<String>) -> String {
        from_env
            .filter(|s| !s.trim().is_empty())
            .or(from_config.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Build an API client from this configuration.
    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.api_base_url(), self.request_timeout())
            .context("Failed to build HTTP client")
    }

    /// Open the session store backed by the session file, restoring any saved session.
    pub fn open_session(&self) -> Result<SessionStore> {
        let data_dir = self
            .data_dir()
            .unwrap_or_else(|_| PathBuf::from(".").join(APP_NAME));
        Ok(SessionStore::open(self.api_client()?, FileStore::in_dir(&data_dir)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            Config::resolve_base_url(Some("http://env".into()), Some("http://cfg".into())),
            "http://env"
        );
        assert_eq!(
            Config::resolve_base_url(None, Some("http://cfg".into())),
            "http://cfg"
        );
        assert_eq!(
            Config::resolve_base_url(Some("  ".into()), None),
            DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn test_request_timeout_default() {
        let mut config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        config.request_timeout_secs = Some(0);
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        config.request_timeout_secs = Some(5);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = serde_json::from_str(r#"{"last_email":"a@b.c"}"#).unwrap();
        assert_eq!(config.last_email.as_deref(), Some("a@b.c"));
        assert!(config.api_base_url.is_none());
    }
}
