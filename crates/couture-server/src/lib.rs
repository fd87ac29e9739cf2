//! Couture REST server library.
//!
//! This module exposes the server implementation for use by integration tests
//! and the unified couture-rs CLI.

mod api;
mod error;
mod server;

pub mod cli;

pub use api::router;
pub use cli::ServerArgs;
pub use error::ServerError;
pub use server::{run, run_with_shutdown, serve};
pub use tokio_util::sync::CancellationToken;
