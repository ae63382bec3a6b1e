//! Error types for the Oxford client.
//!
//! Every failure a call can produce surfaces as an [`OxfordError`] carrying
//! enough context (status, body text, retry count, last training status) to
//! diagnose the root cause without re-issuing the call. A 404 is not an error:
//! the invoker normalizes it to an empty result.

use thiserror::Error;

/// Top-level error type for Oxford client operations.
#[derive(Error, Debug)]
pub enum OxfordError {
    /// The subscription key was missing or empty
    #[error("Subscription key is required but none was provided")]
    InvalidCredential,

    /// None of url, path or stream was populated for an image-bearing call
    #[error("Invalid image source: {0}")]
    InvalidSource(String),

    /// The service kept throttling past the retry ceiling
    #[error("Retry count ({retries}) exceeded: {body}")]
    RetryExhausted { retries: u32, body: String },

    /// The service answered with a status outside 200/201/404/429
    #[error("Status {status}: {body}")]
    RemoteError { status: u16, body: String },

    /// Person group training did not leave the `running` state in time
    #[error("Training timed out after {polls} polls, last known status: {last_status}")]
    TrainingTimeout {
        polls: u32,
        last_status: serde_json::Value,
    },

    /// A typed call received a payload kind it cannot decode
    #[error("Unexpected payload: expected {expected}, got {found}")]
    UnexpectedPayload {
        expected: &'static str,
        found: &'static str,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP transport failed before a response was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading a local image failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl OxfordError {
    /// HTTP status of a remote failure, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            OxfordError::RemoteError { status, .. } => Some(*status),
            OxfordError::RetryExhausted { .. } => Some(429),
            _ => None,
        }
    }
}

/// Convenience type alias for Oxford results.
pub type Result<T> = std::result::Result<T, OxfordError>;
