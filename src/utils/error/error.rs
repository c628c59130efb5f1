//! Error handling for the facade
//!
//! This module defines the error types shared by every operation group.

use crate::storage::redis::ConnectError;
use thiserror::Error;

/// Result type alias for the facade
pub type Result<T> = std::result::Result<T, StoreError>;

/// Main error type for the facade
#[derive(Error, Debug)]
pub enum StoreError {
    /// The connection guard could not hand out a connection
    #[error("Connection error: {0}")]
    Connect(#[from] ConnectError),

    /// Errors raised by the Redis client library, passed through untranslated
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// JSON encoding or decoding of a value failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the error came from failing to obtain a connection
    pub fn is_connection_error(&self) -> bool {
        match self {
            StoreError::Connect(_) => true,
            StoreError::Redis(e) => e.is_io_error() || e.is_connection_dropped(),
            _ => false,
        }
    }
}
