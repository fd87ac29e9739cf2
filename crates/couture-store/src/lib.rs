//! Client record stores and lifecycle service for couture.
//!
//! This crate provides the persistence layer and the domain operations of the
//! tailoring client book: one [`ClientStore`] contract with local, remote and
//! SQL realizations, and a [`ClientService`] on top.
//!
//! # Example
//!
//! ```
//! use couture_store::{ClientService, LocalStore, NewClient};
//!
//! # async fn example() -> Result<(), couture_store::StoreError> {
//! let service = ClientService::new(LocalStore::in_memory());
//!
//! let marie = service
//!     .add_client(NewClient::new("Marie Diop", "77 123 45 67", "Robe de soirée", 25000))
//!     .await?;
//! service.mark_as_delivered(&marie.id).await?;
//! service.archive_client(&marie.id).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
mod id;
mod kv;
mod local;
mod open;
mod query;
mod record;
mod sample;
mod service;
mod traits;

pub mod cli;
pub mod form;

#[cfg(feature = "sql")]
pub mod sql;

pub use cli::ClientsArgs;
pub use couture_core::StoreLocation;
pub use error::StoreError;
pub use form::{ClientForm, FieldIssue, ValidationError};
pub use http::HttpStore;
pub use id::IdGenerator;
pub use kv::{FileKv, KeyValueBackend, MemoryKv};
pub use local::LocalStore;
pub use open::{SharedStore, open_store};
pub use query::{ClientQuery, ClientView, DashboardStats, StatusFilter};
pub use record::{ClientPatch, ClientRecord, NewClient, SpecificMeasurements};
pub use sample::sample_clients;
pub use service::ClientService;
pub use traits::ClientStore;
