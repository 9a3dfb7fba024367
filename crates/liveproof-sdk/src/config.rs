//! Client configuration, loaded once and passed to the client.

use crate::error::SdkError;
use reqwest::Url;
use std::time::Duration;

/// Environment variable holding the API origin
pub const API_URL_ENV: &str = "LIVEPROOF_API_URL";

/// Origin used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Immutable transport configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the verification service
    pub api_url: Url,

    /// Optional per-request timeout (none by default)
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for an explicit origin
    pub fn new(api_url: &str) -> Result<Self, SdkError> {
        let parsed = Url::parse(api_url.trim())
            .map_err(|e| SdkError::InvalidOrigin(format!("{}: {}", api_url, e)))?;

        if parsed.cannot_be_a_base() {
            return Err(SdkError::InvalidOrigin(api_url.to_string()));
        }

        Ok(Self {
            api_url: parsed,
            timeout: None,
        })
    }

    /// Load the origin from `LIVEPROOF_API_URL`, falling back to the default
    pub fn from_env() -> Result<Self, SdkError> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(&url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    /// Set a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: None,
        }
    }
}
