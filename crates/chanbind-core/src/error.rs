//! Error types for the binding lifecycle system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the binding lifecycle system
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument supplied at construction time
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Endpoint-related errors (start/stop/pause failures)
    #[error("endpoint error: {0}")]
    Endpoint(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Binding not found
    #[error("binding not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an endpoint error
    pub fn endpoint(msg: impl Into<String>) -> Self {
        Self::Endpoint(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
