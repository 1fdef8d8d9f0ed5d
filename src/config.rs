//! Configuration handling for the TUI

use crate::api::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "REGISTRATION_ENDPOINT";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Registration endpoint URL
    pub endpoint: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "registration", "registration-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: TuiConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the endpoint, letting `env_override` win over the file
    pub fn endpoint_url(&self, env_override: Option<String>) -> Result<Url> {
        let raw = env_override
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let url = Url::parse(&raw).with_context(|| format!("invalid endpoint URL: {raw}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(anyhow!("unsupported endpoint scheme: {scheme}")),
        }
    }

    /// Resolve the endpoint using the process environment
    pub fn resolve_endpoint(&self) -> Result<Url> {
        self.endpoint_url(std::env::var(ENDPOINT_ENV).ok())
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}
