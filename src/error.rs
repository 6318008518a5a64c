//! Error types for step registration and event emission.

use thiserror::Error;

/// Errors raised while positioning the step cursor or emitting an event.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Unknown step: {0:?}")]
    UnknownStep(String),

    #[error("Event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event sink write failed: {0}")]
    SinkWrite(#[from] std::io::Error),
}

/// Errors surfaced by configuration, logging setup and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Event error: {0}")]
    Event(#[from] EventError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
