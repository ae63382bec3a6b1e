//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Service endpoint and credential settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Subscription key, or a `${ENV_VAR}` reference to one
    pub key: String,

    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Per-request transport timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: "${OXFORD_API_KEY}".to_string(),
            base_url: "https://api.projectoxford.ai".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl ApiConfig {
    /// The subscription key with any `${ENV_VAR}` reference resolved.
    pub fn resolved_key(&self) -> Option<String> {
        resolve_env_var(&self.key)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Throttle (HTTP 429) retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retry ceiling for throttled calls
    pub max_retries: u32,

    /// Backoff used when the service omits a usable `retry-after` header
    pub default_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            default_delay_secs: 1,
        }
    }
}

/// Person group training poll settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Delay between training status polls in milliseconds
    pub poll_interval_ms: u64,

    /// Default number of polls before giving up
    pub timeout_polls: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            timeout_polls: 30,
        }
    }
}

impl TrainingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
