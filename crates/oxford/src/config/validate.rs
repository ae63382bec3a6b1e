//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".into(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(
                "api.base_url must start with http:// or https://".into(),
            ));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_ms must be > 0".into(),
            ));
        }
        if self.training.timeout_polls == 0 {
            return Err(ConfigError::ValidationError(
                "training.timeout_polls must be > 0".into(),
            ));
        }
        Ok(())
    }
}
