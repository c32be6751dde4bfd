//! Error types for the countdown core.

use thiserror::Error;

/// Errors that can occur in countdown operations.
#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("Malformed event record: {0}")]
    MalformedRecord(String),

    #[error("Could not decode text color: {0}")]
    ColorDecode(String),

    #[error("Failed to persist events: {0}")]
    Persist(String),

    #[error("Event title must not be empty")]
    InvalidTitle,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for countdown operations.
pub type CountdownResult<T> = Result<T, CountdownError>;
