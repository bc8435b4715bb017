//! Error types for the diagnostic context.
//!
//! The store itself has exactly one failure mode: [`MdcError::InvalidArgument`],
//! raised when `put` is called without a key. The remaining variants belong to
//! the configuration and logging layers around the store.

use thiserror::Error;

/// The main error type for diagctx operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MdcError {
    /// An argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value could not be applied.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MdcError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true for the store's own argument validation failure.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for MdcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
