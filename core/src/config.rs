//! Client configuration.
//!
//! The base URL is the only required setting. It is read once when a client
//! is constructed and never re-read.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Environment variable holding the base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied by transports that support it. `None` leaves latency unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads through `lookup`, so callers can supply
    /// values from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{BASE_URL_ENV} is not set")))?;
        let timeout_secs = match lookup(TIMEOUT_ENV) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ApiError::Config(format!("{TIMEOUT_ENV}={raw}: {e}")))?,
            ),
            None => None,
        };
        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}
