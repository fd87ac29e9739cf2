//! Local record store.
//!
//! The whole collection is one JSON array under a fixed key. Every mutation
//! is load-all, modify, save-all. Mutations inside one process are serialized
//! by a write lock; separate processes sharing a backend are last-writer-wins.

use async_trait::async_trait;
use couture_core::STORAGE_KEY;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::id::IdGenerator;
use crate::kv::{FileKv, KeyValueBackend, MemoryKv};
use crate::record::{ClientPatch, ClientRecord, NewClient};
use crate::traits::ClientStore;

/// Record store over a [`KeyValueBackend`].
///
/// # Example
/// ```
/// use couture_store::{ClientStore, LocalStore, NewClient};
///
/// # async fn example() -> Result<(), couture_store::StoreError> {
/// let store = LocalStore::in_memory();
/// let created = store
///     .create_one(NewClient::new("Marie Diop", "77 123 45 67", "Robe", 25000))
///     .await?;
/// assert!(store.fetch_one(&created.id).await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LocalStore<K: KeyValueBackend> {
    backend: K,
    key: String,
    ids: IdGenerator,
    write_lock: Mutex<()>,
}

impl LocalStore<MemoryKv> {
    /// Create a store backed by a fresh [`MemoryKv`].
    pub fn in_memory() -> Self {
        Self::new(MemoryKv::new())
    }
}

impl LocalStore<FileKv> {
    /// Create a store persisting under `dir`.
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(FileKv::new(dir))
    }
}

impl<K: KeyValueBackend> LocalStore<K> {
    /// Create a store using the default storage key.
    pub fn new(backend: K) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Create a store using a custom storage key.
    pub fn with_key(backend: K, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            ids: IdGenerator::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get a reference to the underlying backend.
    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Storage key holding the collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the whole stored collection in one write.
    pub async fn save_all(&self, records: &[ClientRecord]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_all(records).await
    }

    async fn read_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        match self.backend.get(&self.key).await? {
            Some(data) if !data.trim().is_empty() => Ok(serde_json::from_str(&data)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn write_all(&self, records: &[ClientRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_string(records)?;
        self.backend.set(&self.key, &data).await?;
        debug!(key = %self.key, count = records.len(), "saved collection");
        Ok(())
    }
}

#[async_trait]
impl<K: KeyValueBackend> ClientStore for LocalStore<K> {
    async fn load_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        self.read_all().await
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        Ok(self.read_all().await?.into_iter().find(|r| r.id == id))
    }

    async fn create_one(&self, client: NewClient) -> Result<ClientRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let id = self
            .ids
            .next_unused(|candidate| records.iter().any(|r| r.id == candidate));
        let record = client.into_record(id, OffsetDateTime::now_utc());
        records.push(record.clone());
        self.write_all(&records).await?;
        Ok(record)
    }

    async fn replace_fields(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        record.apply(patch);
        let updated = record.clone();
        self.write_all(&records).await?;
        Ok(Some(updated))
    }

    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marie() -> NewClient {
        NewClient::new("Marie Diop", "77 123 45 67", "Robe", 25000)
    }

    #[tokio::test]
    async fn test_empty_store_loads_empty() {
        let store = LocalStore::in_memory();
        assert!(store.load_all().await.unwrap().is_empty());
        assert!(store.backend().is_empty());
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let store = LocalStore::in_memory();
        let a = store.create_one(marie()).await.unwrap();
        let b = store
            .create_one(NewClient::new("Amadou", "76 987 65 43", "Costume", 45000))
            .await
            .unwrap();
        let ids: Vec<_> = store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_missing_id_does_not_write() {
        let store = LocalStore::in_memory();
        assert!(
            store
                .replace_fields("nope", ClientPatch::price(1))
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_one("nope").await.unwrap());
        // Nothing was ever written under the key.
        assert!(store.backend().is_empty());
    }

    #[tokio::test]
    async fn test_save_all_replaces_collection() {
        let store = LocalStore::in_memory();
        let created = store.create_one(marie()).await.unwrap();
        store.save_all(&[]).await.unwrap();
        assert!(store.fetch_one(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_error() {
        let kv = MemoryKv::new();
        kv.set(STORAGE_KEY, "{not json").await.unwrap();
        let store = LocalStore::new(kv);
        assert!(matches!(
            store.load_all().await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_key_isolated() {
        let store = LocalStore::with_key(MemoryKv::new(), "other");
        store.create_one(marie()).await.unwrap();
        assert!(store.backend().get(STORAGE_KEY).await.unwrap().is_none());
        assert!(store.backend().get("other").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_creates_do_not_lose_records() {
        let store = std::sync::Arc::new(LocalStore::in_memory());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_one(NewClient::new(format!("client {i}"), "70 000 00 00", "x", i))
                    .await
                    .unwrap()
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 20);
        let mut ids: Vec<_> = all.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
