//! API configuration read from the process environment

use crate::constants::{ENV_API_BASE_URL, ENV_API_TOKEN};
use crate::error::ConfigError;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:41595/api`
    pub base_url: String,
    pub token: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let raw_url = required(ENV_API_BASE_URL)?;
        let token = required(ENV_API_TOKEN)?;

        let base_url = raw_url.trim_end_matches('/').to_string();
        match reqwest::Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: raw_url,
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: raw_url,
                    reason: e.to_string(),
                })
            }
        }

        debug!(base_url = %base_url, "API config loaded");
        Ok(Self { base_url, token })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}
