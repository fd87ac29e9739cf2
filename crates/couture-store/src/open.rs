//! Store selection from a [`StoreLocation`].

use std::sync::Arc;
use std::time::Duration;

use couture_core::StoreLocation;
use tracing::info;

use crate::error::StoreError;
use crate::http::HttpStore;
use crate::local::LocalStore;
use crate::traits::ClientStore;

/// Type-erased store handle, shareable across tasks.
pub type SharedStore = Arc<dyn ClientStore>;

/// Open the store a location points at.
///
/// SQL locations connect eagerly and create the table if needed. They need
/// one of the `sql-*` features; without it they fail with
/// [`StoreError::InvalidLocation`].
pub async fn open_store(
    location: &StoreLocation,
    http_timeout: Duration,
) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match location {
        StoreLocation::Memory => Arc::new(LocalStore::in_memory()),
        StoreLocation::File(dir) => Arc::new(LocalStore::in_dir(dir.clone())),
        StoreLocation::Http(url) => Arc::new(HttpStore::with_timeout(url, http_timeout)?),
        StoreLocation::Sql(url) => open_sql(url).await?,
    };
    info!(kind = location.kind(), "store opened");
    Ok(store)
}

#[cfg(feature = "sql")]
async fn open_sql(url: &str) -> Result<SharedStore, StoreError> {
    use crate::sql::{SqlStore, SqlStoreConfig};

    let store = SqlStore::connect(SqlStoreConfig::new(url)).await?;
    store.init_schema().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sql"))]
async fn open_sql(url: &str) -> Result<SharedStore, StoreError> {
    Err(StoreError::InvalidLocation(format!(
        "{url}: built without SQL support"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewClient;

    #[tokio::test]
    async fn test_open_memory_and_file() {
        let memory = open_store(&StoreLocation::Memory, Duration::from_secs(1))
            .await
            .unwrap();
        memory
            .create_one(NewClient::new("Marie", "77 123 45 67", "Robe", 1))
            .await
            .unwrap();
        assert_eq!(memory.load_all().await.unwrap().len(), 1);

        let tmp = tempfile::tempdir().unwrap();
        let location: StoreLocation = format!("file:{}", tmp.path().display()).parse().unwrap();
        let file = open_store(&location, Duration::from_secs(1)).await.unwrap();
        file.create_one(NewClient::new("Amadou", "76 987 65 43", "Costume", 2))
            .await
            .unwrap();

        // A second handle on the same directory sees the write.
        let again = open_store(&location, Duration::from_secs(1)).await.unwrap();
        assert_eq!(again.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_http_rejects_bad_url() {
        let location = StoreLocation::Http("http://".into());
        assert!(open_store(&location, Duration::from_secs(1)).await.is_err());
    }

    #[cfg(feature = "sql-sqlite")]
    #[tokio::test]
    async fn test_open_sqlite_memory() {
        use crate::service::ClientService;

        let location: StoreLocation = "sqlite::memory:".parse().unwrap();
        let service = ClientService::new(open_store(&location, Duration::from_secs(5)).await.unwrap());

        let marie = service
            .add_client(NewClient::new("Marie Diop", "77 123 45 67", "Robe", 25000))
            .await
            .unwrap();
        assert_eq!(service.generate_sample_clients().await.unwrap(), 0);
        assert_eq!(service.get_client_by_id(&marie.id).await.unwrap(), Some(marie));
        assert_eq!(service.get_all_clients().await.unwrap().len(), 1);
    }
}
