//! Lifecycle properties checked against every local store realization.

use couture_store::{
    ClientPatch, ClientRecord, ClientService, ClientStore, LocalStore, NewClient, StoreError,
};

fn marie() -> NewClient {
    NewClient::new("Marie Diop", "77 123 45 67", "Robe de soirée bleu marine", 25000)
        .measurements("Tour de taille: 75cm")
}

async fn check_lifecycle<S: ClientStore>(service: ClientService<S>) -> Result<(), StoreError> {
    // Round-trip with default flags.
    let created = service.add_client(marie()).await?;
    assert!(!created.id.is_empty());
    assert!(!created.delivered && !created.archived);
    let fetched = service.get_client_by_id(&created.id).await?;
    assert_eq!(fetched.as_ref(), Some(&created));

    // Merge touches only the supplied field.
    let priced = service
        .update_client(&created.id, ClientPatch::price(500))
        .await?
        .expect("record exists");
    assert_eq!(priced, ClientRecord { price: 500, ..created.clone() });

    // Archiving twice is the same as once.
    let once = service.archive_client(&created.id).await?.expect("record exists");
    let twice = service.archive_client(&created.id).await?.expect("record exists");
    assert_eq!(once, twice);
    assert_eq!(twice, ClientRecord { archived: true, ..priced.clone() });

    // Delivered and archived are independent.
    let both = service.mark_as_delivered(&created.id).await?.expect("record exists");
    assert!(both.delivered && both.archived);
    let restored = service.unarchive_client(&created.id).await?.expect("record exists");
    assert!(restored.delivered && !restored.archived);
    assert_eq!(restored.date, created.date);

    // Unknown ids are absent results and change nothing.
    let before = service.get_all_clients().await?;
    assert!(service.get_client_by_id("unknown").await?.is_none());
    assert!(service.update_client("unknown", ClientPatch::price(1)).await?.is_none());
    assert!(service.archive_client("unknown").await?.is_none());
    assert!(!service.delete_client("unknown").await?);
    assert_eq!(service.get_all_clients().await?, before);

    // Delete is permanent.
    assert!(service.delete_client(&created.id).await?);
    assert!(service.get_client_by_id(&created.id).await?.is_none());
    assert!(
        service
            .get_all_clients()
            .await?
            .iter()
            .all(|r| r.id != created.id)
    );
    assert!(!service.delete_client(&created.id).await?);

    // Seeding into an empty store, twice.
    assert_eq!(service.generate_sample_clients().await?, 4);
    assert_eq!(service.generate_sample_clients().await?, 0);
    let all = service.get_all_clients().await?;
    assert_eq!(all.len(), 4);
    let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Marie Diop", "Amadou Ndiaye", "Fatou Sall", "Omar Seck"]);
    Ok(())
}

#[tokio::test]
async fn test_memory_store_lifecycle() {
    check_lifecycle(ClientService::new(LocalStore::in_memory()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_file_store_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    check_lifecycle(ClientService::new(LocalStore::in_dir(tmp.path())))
        .await
        .unwrap();

    // The collection survives a fresh handle.
    let reopened = ClientService::new(LocalStore::in_dir(tmp.path()));
    assert_eq!(reopened.get_all_clients().await.unwrap().len(), 4);
    assert!(tmp.path().join("couture_clients.json").exists());
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_blob() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("couture_clients.json"), "[{\"id\":").unwrap();
    let service = ClientService::new(LocalStore::in_dir(tmp.path()));
    assert!(matches!(
        service.get_all_clients().await,
        Err(StoreError::Corrupt(_))
    ));
}

#[cfg(feature = "sql-sqlite")]
#[tokio::test]
async fn test_sqlite_store_lifecycle() {
    use couture_store::sql::{SqlStore, SqlStoreConfig};

    let store = SqlStore::connect(SqlStoreConfig::new("sqlite::memory:").max_connections(1))
        .await
        .unwrap();
    store.init_schema().await.unwrap();
    check_lifecycle(ClientService::new(store)).await.unwrap();
}

#[cfg(feature = "sql-sqlite")]
#[tokio::test]
async fn test_sqlite_file_persists() {
    use couture_store::{StoreLocation, open_store};
    use std::time::Duration;

    let tmp = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", tmp.path().join("couture.db").display());
    let location: StoreLocation = url.parse().unwrap();

    let store = open_store(&location, Duration::from_secs(5)).await.unwrap();
    ClientService::new(store).generate_sample_clients().await.unwrap();

    let again = open_store(&location, Duration::from_secs(5)).await.unwrap();
    assert_eq!(again.load_all().await.unwrap().len(), 4);
}
