//! SQL database record store.
//!
//! This module provides a record store on PostgreSQL, MySQL or SQLite through
//! the SQLx `Any` driver. It is the hosted table behind the REST server.
//!
//! # Features
//!
//! Enable one or more database features in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! couture-store = { version = "0.1", features = ["sql-postgres"] }
//! # or
//! couture-store = { version = "0.1", features = ["sql-mysql"] }
//! # or
//! couture-store = { version = "0.1", features = ["sql-sqlite"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use couture_store::sql::{SqlStore, SqlStoreConfig};
//!
//! let store = SqlStore::connect(SqlStoreConfig::new("sqlite:couture.db")).await?;
//! store.init_schema().await?;
//! ```
//!
//! # Database Schema
//!
//! [`SqlStore::init_schema`] creates the table if it does not exist
//! (PostgreSQL flavour shown; SQLite declares the two flags INTEGER):
//!
//! ```sql
//! CREATE TABLE clients (
//!     id VARCHAR(64) PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     phone TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     measurements TEXT NOT NULL,
//!     specific_measurements TEXT,      -- JSON object
//!     price BIGINT NOT NULL,
//!     fabric_photo TEXT,
//!     date TEXT NOT NULL,              -- RFC 3339
//!     delivered BOOLEAN NOT NULL DEFAULT FALSE,
//!     archived BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```

mod backend;
mod config;
mod queries;


pub use backend::{DatabaseType, SqlStore};
pub use config::SqlStoreConfig;
