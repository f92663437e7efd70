//! Error types for storage and configuration.

use thiserror::Error;

/// Errors raised by storage backends and the progress store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrapper around filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON encoding and decoding errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend has no room left for the value.
    #[error("storage quota exceeded: needed {needed} bytes, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// The key cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend is disabled or cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while reading or writing tracker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
