//! Core constants shared across couture crates.
//!
//! This crate provides:
//! - Default configuration values
//! - Error classification constants for logging
//! - Store location parsing
//! - Common project metadata

pub mod defaults;
pub mod errors;
pub mod location;

// Re-export commonly used items at crate root
pub use defaults::*;
pub use errors::*;
pub use location::{LocationError, StoreLocation};

/// Project name.
pub const PROJECT_NAME: &str = "couture-rs";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
