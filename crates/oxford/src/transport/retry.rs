//! Throttle retry policy.
//!
//! The service signals throttling with HTTP 429 and a `retry-after` header in
//! whole seconds. The invoker waits exactly that long and retries, up to a
//! fixed ceiling.

use crate::config::RetryConfig;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Retry ceiling and fallback delay for throttled calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Highest retry count at which another attempt is still allowed
    pub max_retries: u32,
    /// Delay used when `retry-after` is missing or not an integer
    pub default_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            default_delay: Duration::from_secs(config.default_delay_secs),
        }
    }

    /// Whether a call throttled after `retries` retries may try again.
    ///
    /// The comparison is inclusive: a ceiling of 3 allows retries numbered
    /// 0 through 3, so at most `max_retries + 2` requests are issued.
    pub fn should_retry(&self, retries: u32) -> bool {
        retries <= self.max_retries
    }

    /// How long to wait before the next attempt.
    pub fn backoff(&self, retry_after_secs: Option<u64>) -> Duration {
        retry_after_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_delay)
    }
}

/// Read `retry-after` as an integer number of seconds.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
