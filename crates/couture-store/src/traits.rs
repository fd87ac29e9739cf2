//! Record store trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{ClientPatch, ClientRecord, NewClient};

/// Persistence contract shared by every record store.
///
/// Implementations must be thread-safe (`Send + Sync`) as the REST server
/// calls them concurrently from request handlers.
///
/// A missing id is never an error: lookups return `Ok(None)` and deletes
/// return `Ok(false)`. `Err` is reserved for backend failures.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Load every record, in storage order.
    async fn load_all(&self) -> Result<Vec<ClientRecord>, StoreError>;

    /// Load one record by id.
    async fn fetch_one(&self, id: &str) -> Result<Option<ClientRecord>, StoreError>;

    /// Persist a new record. The store assigns the id.
    async fn create_one(&self, client: NewClient) -> Result<ClientRecord, StoreError>;

    /// Merge `patch` into the record with `id` and return the result.
    ///
    /// Returns `None` without touching storage when the id is missing.
    async fn replace_fields(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError>;

    /// Permanently remove a record. Returns `false` if no record had that id.
    async fn delete_one(&self, id: &str) -> Result<bool, StoreError>;
}

/// Blanket implementation for `Arc<S>` where `S: ClientStore`.
///
/// This allows passing `Arc<dyn ClientStore>` wherever a store is expected.
#[async_trait]
impl<S: ClientStore + ?Sized> ClientStore for Arc<S> {
    #[inline]
    async fn load_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        (**self).load_all().await
    }

    #[inline]
    async fn fetch_one(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        (**self).fetch_one(id).await
    }

    #[inline]
    async fn create_one(&self, client: NewClient) -> Result<ClientRecord, StoreError> {
        (**self).create_one(client).await
    }

    #[inline]
    async fn replace_fields(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError> {
        (**self).replace_fields(id, patch).await
    }

    #[inline]
    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete_one(id).await
    }
}

/// Blanket implementation for `Box<S>` where `S: ClientStore`.
#[async_trait]
impl<S: ClientStore + ?Sized> ClientStore for Box<S> {
    #[inline]
    async fn load_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        (**self).load_all().await
    }

    #[inline]
    async fn fetch_one(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        (**self).fetch_one(id).await
    }

    #[inline]
    async fn create_one(&self, client: NewClient) -> Result<ClientRecord, StoreError> {
        (**self).create_one(client).await
    }

    #[inline]
    async fn replace_fields(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError> {
        (**self).replace_fields(id, patch).await
    }

    #[inline]
    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete_one(id).await
    }
}
