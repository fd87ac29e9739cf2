//! Server error types.

use couture_config::ConfigError;
use couture_core::{ERROR_CONFIG, ERROR_IO, LocationError};
use couture_store::StoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("config: {0}")]
    Config(String),
}

impl ServerError {
    /// Get the error type string for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Io(_) => ERROR_IO,
            ServerError::Store(e) => e.error_type(),
            ServerError::Config(_) => ERROR_CONFIG,
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<LocationError> for ServerError {
    fn from(err: LocationError) -> Self {
        Self::Config(err.to_string())
    }
}
