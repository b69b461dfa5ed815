//! Error types

use thiserror::Error;

/// Failure while reading the API configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failure of a single API request. Never leaves the fetcher; callers get an
/// empty result and the error goes to the log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no data array")]
    MissingData,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The URL carries the API token
        FetchError::Transport(e.without_url())
    }
}

/// Startup failures returned from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("window error: {0}")]
    Gui(#[from] eframe::Error),
}
