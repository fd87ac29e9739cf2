//! Configuration type definitions for the server, the store, and logging.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Top-level configuration. Every section is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:4000`.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Maximum request body size. Fabric photos travel inline, so keep it generous.
    #[serde(default = "default_request_body_limit_bytes")]
    pub request_body_limit_bytes: usize,
    /// Send permissive CORS headers so browser front ends on other origins can call the API.
    #[serde(default = "default_cors_enabled")]
    pub cors: bool,
    /// Grace period for in-flight requests after a shutdown signal.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            request_body_limit_bytes: default_request_body_limit_bytes(),
            cors: default_cors_enabled(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store location: `memory:`, `file:<dir>`, `http(s)://…`, or a SQL URL.
    #[serde(default = "default_store_location")]
    pub location: String,
    /// Insert the demonstration set at startup when the store is empty.
    #[serde(default = "default_seed_on_start")]
    pub seed_on_start: bool,
    /// Request timeout for `http(s)://` locations.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
            seed_on_start: default_seed_on_start(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"couture_store": "debug", "sqlx": "warn"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}
