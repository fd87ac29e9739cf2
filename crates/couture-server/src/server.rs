//! Server startup and graceful shutdown.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use couture_config::{Config, ServerConfig};
use couture_core::StoreLocation;
use couture_store::{ClientService, SharedStore, open_store};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::router;
use crate::error::ServerError;

/// Open the configured store, seed it if asked, and serve until `shutdown` fires.
pub async fn run_with_shutdown(
    config: Config,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let location: StoreLocation = config.store.location.parse()?;
    let store = open_store(
        &location,
        Duration::from_secs(config.store.http_timeout_secs),
    )
    .await?;

    if config.store.seed_on_start {
        let inserted = ClientService::new(store.clone())
            .generate_sample_clients()
            .await?;
        info!(inserted, "seed on start");
    }

    let listen: SocketAddr = config
        .server
        .listen
        .parse()
        .map_err(|_| ServerError::Config("invalid listen address".into()))?;
    let listener = TcpListener::bind(listen).await?;

    serve(listener, store, config.server, shutdown).await
}

/// Run the server (blocking until error, no graceful shutdown).
pub async fn run(config: Config) -> Result<(), ServerError> {
    run_with_shutdown(config, CancellationToken::new()).await
}

/// Serve the API on an already bound listener.
///
/// After `shutdown` fires, in-flight requests get `shutdown_timeout_secs`
/// to finish before the server stops anyway.
pub async fn serve(
    listener: TcpListener,
    store: SharedStore,
    config: ServerConfig,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    let app = router(store, &config);
    info!(%addr, cors = config.cors, "couture server listening");

    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        () = async {
            shutdown.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_secs = grace.as_secs(), "shutdown timeout, dropping in-flight requests");
        }
    }

    info!("server stopped");
    Ok(())
}
