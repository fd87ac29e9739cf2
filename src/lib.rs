//! # couture-rs
//!
//! Client records for a tailoring workshop.
//!
//! ## Crates
//!
//! - [`couture_core`] - Shared defaults, constants and store locations
//! - [`couture_store`] - Record stores (local, remote, SQL) and the lifecycle service
//! - [`couture_config`] - Configuration loading and validation
//! - [`couture_server`] - REST server

pub use couture_config as config;
pub use couture_core as core;
pub use couture_server as server;
pub use couture_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use couture_config::{Config, load_config, validate_config};
    pub use couture_server::{CancellationToken, ServerError, run, run_with_shutdown};
    pub use couture_store::{
        ClientPatch, ClientQuery, ClientRecord, ClientService, ClientStore, HttpStore,
        LocalStore, NewClient, StoreError, StoreLocation, open_store,
    };
}
