//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Storage Defaults
// ============================================================================

/// Key under which the local store keeps the serialized client collection.
pub const STORAGE_KEY: &str = "couture_clients";
/// Default store location used when neither config nor CLI provides one.
pub const DEFAULT_STORE_LOCATION: &str = "file:./data";

// ============================================================================
// HTTP Defaults
// ============================================================================

/// Default REST listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:4000";
/// Path prefix for the clients collection.
pub const API_CLIENTS_PATH: &str = "/api/clients";
/// Default request timeout for the remote store (seconds).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// Default maximum request body size. Fabric photos travel inline as data URIs.
pub const DEFAULT_REQUEST_BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;
/// Default CORS policy (permissive).
pub const DEFAULT_CORS_ENABLED: bool = true;
/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Lifecycle Defaults
// ============================================================================

/// Seed the demonstration set when the store is empty at startup.
pub const DEFAULT_SEED_ON_START: bool = false;
/// Number of records in the dashboard's "recent" list.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

// ============================================================================
// Form Validation Limits
// ============================================================================

/// Minimum length of a client name.
pub const MIN_NAME_CHARS: usize = 2;
/// Minimum length of a phone number.
pub const MIN_PHONE_CHARS: usize = 8;
/// Minimum length of an order description.
pub const MIN_DESCRIPTION_CHARS: usize = 3;
/// Largest accepted fabric photo, measured on the decoded image.
pub const MAX_FABRIC_PHOTO_BYTES: usize = 5 * 1024 * 1024;
