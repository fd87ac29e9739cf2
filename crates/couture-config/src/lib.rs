//! Configuration loading and CLI definitions.
//!
//! This crate provides:
//! - Configuration types for the REST server, the record store and logging
//! - Loading from JSON, JSONC, YAML and TOML files
//! - CLI overrides for command-line arguments
//! - Configuration validation

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, load_config};
pub use types::*;
pub use validate::validate_config;
