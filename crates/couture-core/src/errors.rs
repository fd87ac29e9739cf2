//! Error classification constants for logging.
//!
//! Server handlers tag failures with one of these so log filters stay stable
//! across store backends.

/// Persistence backend could not be reached or answered with a failure.
pub const ERROR_STORE: &str = "store";
/// Persisted data could not be decoded.
pub const ERROR_CORRUPT: &str = "corrupt";
/// I/O error.
pub const ERROR_IO: &str = "io";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
/// Request referenced a client id that does not exist.
pub const ERROR_NOT_FOUND: &str = "not_found";
