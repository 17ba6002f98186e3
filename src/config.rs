//! Process configuration read from the environment.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file by the binary. A literal `0` or `false` is a real value and never
//! means "use the default"; only an unset or empty variable does.

use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_API_URL: &str = "REGISTRY_API_URL";
pub const ENV_API_KEY: &str = "REGISTRY_API_KEY";
pub const ENV_USER_UID: &str = "REGISTRY_USER_UID";
pub const ENV_TIMEOUT_SECS: &str = "REGISTRY_TIMEOUT_SECS";
pub const ENV_HIDE_NULLS: &str = "REGISTRY_HIDE_NULLS";
pub const ENV_EPOCH_TO_DATETIME: &str = "REGISTRY_EPOCH_TO_DATETIME";
pub const ENV_DEBUGGING: &str = "REGISTRY_DEBUGGING";

/// Default request timeout (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Display switches consumed by the response normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Omit null-valued fields from output.
    pub suppress_nulls: bool,
    /// Render epoch-second integers under date keys as timestamps.
    pub render_dates_from_epoch: bool,
    /// Print responses exactly as received.
    pub debugging: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            suppress_nulls: true,
            render_dates_from_epoch: false,
            debugging: false,
        }
    }
}

impl DisplayConfig {
    /// Read display switches from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read display switches through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            suppress_nulls: parse_bool(ENV_HIDE_NULLS, lookup(ENV_HIDE_NULLS))?
                .unwrap_or(defaults.suppress_nulls),
            render_dates_from_epoch: parse_bool(
                ENV_EPOCH_TO_DATETIME,
                lookup(ENV_EPOCH_TO_DATETIME),
            )?
            .unwrap_or(defaults.render_dates_from_epoch),
            debugging: parse_bool(ENV_DEBUGGING, lookup(ENV_DEBUGGING))?
                .unwrap_or(defaults.debugging),
        })
    }
}

/// Connection settings for the registry API.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL, e.g. `https://registry.example.mil`.
    pub api_url: String,
    /// Value of the `api-key` header.
    pub api_key: Option<String>,
    /// Value of the `user-uid` header.
    pub user_uid: Option<String>,
    /// Request timeout; `None` disables it.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_uid", &self.user_uid)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RegistryConfig {
    /// Read connection settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read connection settings through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no API URL is configured and
    /// `ConfigError::InvalidNumber` for an unparseable timeout.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = non_empty(lookup(ENV_API_URL)).ok_or_else(|| ConfigError::Missing {
            name: ENV_API_URL.to_string(),
        })?;

        let timeout = match parse_u64(ENV_TIMEOUT_SECS, lookup(ENV_TIMEOUT_SECS))? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: non_empty(lookup(ENV_API_KEY)),
            user_uid: non_empty(lookup(ENV_USER_UID)),
            timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a boolean variable. `Ok(None)` means unset.
fn parse_bool(name: &str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value,
        }),
    }
}

/// Parse a non-negative integer variable. `Ok(None)` means unset.
fn parse_u64(name: &str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber {
            name: name.to_string(),
            value,
        })
}
