//! Runtime configuration for the tracker.
//!
//! Values come from `YOJITSU_*` environment variables, optionally seeded from
//! a `.env` file, or from any serde source.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the REST backend base URL.
pub const API_BASE_URL_VAR: &str = "YOJITSU_API_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS_VAR: &str = "YOJITSU_REQUEST_TIMEOUT_SECS";
/// Environment variable holding the live-total tick period in milliseconds.
pub const TICK_MILLIS_VAR: &str = "YOJITSU_TICK_MILLIS";

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the todo REST backend, e.g. `http://localhost:8080`.
    pub api_base_url: String,
    /// Per-request timeout for gateway calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Period between live-total updates.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable is set to an unusable value.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Offending variable.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_tick_millis() -> u64 {
    1000
}

impl TrackerConfig {
    /// Creates a configuration for `api_base_url` with default timings.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_secs: default_request_timeout_secs(),
            tick_millis: default_tick_millis(),
        }
    }

    /// Loads configuration from the process environment after applying any
    /// `.env` file found in the working directory or its parents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is missing or a value does
    /// not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = lookup(API_BASE_URL_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(API_BASE_URL_VAR))?;

        let config = Self {
            api_base_url,
            request_timeout_secs: parse_positive(&lookup, REQUEST_TIMEOUT_SECS_VAR)?
                .unwrap_or_else(default_request_timeout_secs),
            tick_millis: parse_positive(&lookup, TICK_MILLIS_VAR)?
                .unwrap_or_else(default_tick_millis),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the loaded values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-HTTP base URL or a zero
    /// duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://")
            || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                key: API_BASE_URL_VAR,
                value: self.api_base_url.clone(),
                reason: "expected an http:// or https:// URL",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(zero_duration(REQUEST_TIMEOUT_SECS_VAR));
        }
        if self.tick_millis == 0 {
            return Err(zero_duration(TICK_MILLIS_VAR));
        }
        Ok(())
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the live-total tick period.
    #[must_use]
    pub const fn display_tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(zero_duration(key)),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected a positive integer",
        }),
    }
}

fn zero_duration(key: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: "0".to_owned(),
        reason: "must be greater than zero",
    }
}
