//! Client lifecycle service.
//!
//! [`ClientService<S>`] wraps any [`ClientStore`] and provides the domain
//! operations on top of it:
//! - CRUD pass-throughs that log every mutation
//! - Flag transitions (archive, unarchive, deliver) expressed as patches
//! - Idempotent seeding of the demonstration set
//! - Views, search and dashboard counters over the loaded collection

use tracing::{debug, info};

use crate::error::StoreError;
use crate::query::{ClientQuery, DashboardStats};
use crate::record::{ClientPatch, ClientRecord, NewClient};
use crate::sample::sample_clients;
use crate::traits::ClientStore;

/// Domain operations over a [`ClientStore`].
///
/// Missing ids are reported as `None` / `false`, never as an error. Flag
/// operations are idempotent: applying one twice leaves the same record.
///
/// # Type parameter
///
/// - `S`: the underlying record store (e.g. `LocalStore<FileKv>`, `HttpStore`)
#[derive(Debug, Clone)]
pub struct ClientService<S: ClientStore> {
    store: S,
}

impl<S: ClientStore> ClientService<S> {
    /// Create a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every record, in storage order.
    pub async fn get_all_clients(&self) -> Result<Vec<ClientRecord>, StoreError> {
        self.store.load_all().await
    }

    pub async fn get_client_by_id(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        self.store.fetch_one(id).await
    }

    /// Persist a new record. The store assigns the id.
    pub async fn add_client(&self, client: NewClient) -> Result<ClientRecord, StoreError> {
        let record = self.store.create_one(client).await?;
        info!(id = %record.id, name = %record.name, "client added");
        Ok(record)
    }

    /// Shallow-merge `patch` into the record with `id`.
    ///
    /// Returns `None` (and writes nothing) when the id is unknown.
    pub async fn update_client(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError> {
        let updated = self.store.replace_fields(id, patch).await?;
        match &updated {
            Some(_) => info!(%id, "client updated"),
            None => debug!(%id, "update skipped, no such client"),
        }
        Ok(updated)
    }

    /// Permanently remove a record. Returns `false` when nothing matched.
    pub async fn delete_client(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.store.delete_one(id).await?;
        if deleted {
            info!(%id, "client deleted");
        } else {
            debug!(%id, "delete skipped, no such client");
        }
        Ok(deleted)
    }

    pub async fn archive_client(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        self.update_client(id, ClientPatch::archived(true)).await
    }

    pub async fn unarchive_client(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        self.update_client(id, ClientPatch::archived(false)).await
    }

    pub async fn mark_as_delivered(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        self.update_client(id, ClientPatch::delivered(true)).await
    }

    /// Insert the demonstration set if the store is empty.
    ///
    /// Returns the number of records inserted (0 when the store already had data).
    pub async fn generate_sample_clients(&self) -> Result<usize, StoreError> {
        if !self.store.load_all().await?.is_empty() {
            debug!("store not empty, skipping sample data");
            return Ok(0);
        }
        let samples = sample_clients();
        let count = samples.len();
        for client in samples {
            self.store.create_one(client).await?;
        }
        info!(count, "sample clients generated");
        Ok(count)
    }

    /// Records matching a view, filter and search, in storage order.
    pub async fn find_clients(&self, query: &ClientQuery) -> Result<Vec<ClientRecord>, StoreError> {
        Ok(query.apply(self.store.load_all().await?))
    }

    /// Counters for the dashboard.
    pub async fn dashboard(&self) -> Result<DashboardStats, StoreError> {
        Ok(DashboardStats::from_records(&self.store.load_all().await?))
    }

    /// The `limit` most recent records by creation date, newest first.
    pub async fn recent_clients(&self, limit: usize) -> Result<Vec<ClientRecord>, StoreError> {
        let mut records = self.store.load_all().await?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalStore;
    use crate::kv::MemoryKv;

    fn service() -> ClientService<LocalStore<MemoryKv>> {
        ClientService::new(LocalStore::in_memory())
    }

    fn marie() -> NewClient {
        NewClient::new("Marie Diop", "77 123 45 67", "Robe de soirée", 25000)
    }

    #[tokio::test]
    async fn test_marie_scenario() {
        let svc = service();
        let marie = svc.add_client(marie()).await.unwrap();
        assert!(!marie.id.is_empty());
        assert!(!marie.delivered && !marie.archived);

        svc.mark_as_delivered(&marie.id).await.unwrap().unwrap();
        let done = svc.archive_client(&marie.id).await.unwrap().unwrap();
        assert!(done.delivered && done.archived);
        assert_eq!(svc.get_client_by_id(&marie.id).await.unwrap(), Some(done));
    }

    #[tokio::test]
    async fn test_archive_is_idempotent() {
        let svc = service();
        let created = svc.add_client(marie()).await.unwrap();
        let once = svc.archive_client(&created.id).await.unwrap().unwrap();
        let twice = svc.archive_client(&created.id).await.unwrap().unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice, ClientRecord { archived: true, ..created.clone() });

        let back = svc.unarchive_client(&created.id).await.unwrap().unwrap();
        assert!(!back.archived);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let svc = service();
        svc.add_client(marie()).await.unwrap();
        let before = svc.get_all_clients().await.unwrap();

        assert!(svc.get_client_by_id("missing").await.unwrap().is_none());
        assert!(svc.mark_as_delivered("missing").await.unwrap().is_none());
        assert!(!svc.delete_client("missing").await.unwrap());
        assert_eq!(svc.get_all_clients().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_seeding_twice() {
        let svc = service();
        assert_eq!(svc.generate_sample_clients().await.unwrap(), 4);
        assert_eq!(svc.generate_sample_clients().await.unwrap(), 0);
        let all = svc.get_all_clients().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].name, "Marie Diop");
    }

    #[tokio::test]
    async fn test_seeding_skips_non_empty_store() {
        let svc = service();
        svc.add_client(marie()).await.unwrap();
        assert_eq!(svc.generate_sample_clients().await.unwrap(), 0);
        assert_eq!(svc.get_all_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_and_recent() {
        let svc = service();
        svc.generate_sample_clients().await.unwrap();

        let stats = svc.dashboard().await.unwrap();
        assert_eq!((stats.total, stats.active, stats.delivered, stats.archived), (4, 2, 2, 1));

        let names: Vec<_> = svc
            .recent_clients(3)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Fatou Sall", "Marie Diop", "Amadou Ndiaye"]);
    }

    #[tokio::test]
    async fn test_find_clients() {
        use crate::query::{ClientView, StatusFilter};

        let svc = service();
        svc.generate_sample_clients().await.unwrap();
        let pending = svc
            .find_clients(&ClientQuery::new().view(ClientView::Clients).filter(StatusFilter::Active))
            .await
            .unwrap();
        let names: Vec<_> = pending.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Marie Diop", "Fatou Sall"]);
    }
}
