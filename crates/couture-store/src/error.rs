//! Store error types.
//!
//! "Not found" is deliberately absent: lookups return `Option`/`bool` so
//! callers can tell a missing record apart from a backend that failed.

use couture_core::{ERROR_CONFIG, ERROR_CORRUPT, ERROR_IO, ERROR_STORE, LocationError};

/// Store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend could not be reached or answered with a failure status.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Local filesystem error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted collection could not be decoded.
    #[error("corrupt store data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// SQL backend error.
    #[error("database: {0}")]
    Database(String),

    /// Store location could not be opened.
    #[error("invalid store location: {0}")]
    InvalidLocation(String),
}

impl StoreError {
    /// Create an unavailable error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Unavailable(err.to_string())
    }

    /// Error classification string for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Unavailable(_) | Self::Database(_) => ERROR_STORE,
            Self::Io(_) => ERROR_IO,
            Self::Corrupt(_) => ERROR_CORRUPT,
            Self::InvalidLocation(_) => ERROR_CONFIG,
        }
    }
}

impl From<LocationError> for StoreError {
    fn from(err: LocationError) -> Self {
        Self::InvalidLocation(err.0)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

#[cfg(feature = "sql")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
