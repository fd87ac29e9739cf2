//! REST routes for client records.
//!
//! | Method | Path | Body | Success |
//! |---|---|---|---|
//! | GET | `/api/clients?q=&view=&filter=` | | array of records |
//! | GET | `/api/clients/{id}` | | record |
//! | POST | `/api/clients` | new client | created record |
//! | PUT | `/api/clients/{id}` | partial record | merged record |
//! | DELETE | `/api/clients/{id}` | | `{message}` |
//! | GET | `/api/stats` | | dashboard counters |
//! | GET | `/api/recent?limit=` | | newest records |
//! | GET | `/health` | | `{status, version}` |
//!
//! Failures answer `{ "error": "..." }` with 404 for unknown ids and 500 for
//! store failures.

use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use couture_config::ServerConfig;
use couture_core::{API_CLIENTS_PATH, DEFAULT_RECENT_LIMIT, ERROR_NOT_FOUND, VERSION};
use couture_store::{
    ClientPatch, ClientQuery, ClientRecord, ClientService, DashboardStats, NewClient, SharedStore,
    StoreError,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

type Service = ClientService<SharedStore>;

/// Handler failure, rendered as `{ "error": ... }`.
#[derive(Debug)]
pub(crate) enum ApiError {
    NotFound(String),
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(id) => {
                debug!(%id, error_type = ERROR_NOT_FOUND, "client not found");
                (StatusCode::NOT_FOUND, format!("Client not found: {id}"))
            }
            ApiError::Store(e) => {
                warn!(error = %e, error_type = e.error_type(), "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn found<T>(value: Option<T>, id: String) -> ApiResult<T> {
    value.map(Json).ok_or(ApiError::NotFound(id))
}

/// Build the API router over a store.
pub fn router(store: SharedStore, config: &ServerConfig) -> Router {
    let clients_item = format!("{API_CLIENTS_PATH}/{{id}}");
    let app = Router::new()
        .route("/health", get(health))
        .route(API_CLIENTS_PATH, get(list_clients).post(create_client))
        .route(
            &clients_item,
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/api/stats", get(stats))
        .route("/api/recent", get(recent))
        .with_state(ClientService::new(store))
        .layer(DefaultBodyLimit::max(config.request_body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

async fn list_clients(
    State(service): State<Service>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Vec<ClientRecord>> {
    Ok(Json(service.find_clients(&query).await?))
}

async fn get_client(
    State(service): State<Service>,
    Path(id): Path<String>,
) -> ApiResult<ClientRecord> {
    found(service.get_client_by_id(&id).await?, id)
}

async fn create_client(
    State(service): State<Service>,
    Json(client): Json<NewClient>,
) -> ApiResult<ClientRecord> {
    Ok(Json(service.add_client(client).await?))
}

async fn update_client(
    State(service): State<Service>,
    Path(id): Path<String>,
    Json(patch): Json<ClientPatch>,
) -> ApiResult<ClientRecord> {
    found(service.update_client(&id, patch).await?, id)
}

async fn delete_client(
    State(service): State<Service>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if service.delete_client(&id).await? {
        Ok(Json(json!({ "message": "Client deleted" })))
    } else {
        Err(ApiError::NotFound(id))
    }
}

async fn stats(State(service): State<Service>) -> ApiResult<DashboardStats> {
    Ok(Json(service.dashboard().await?))
}

#[derive(Deserialize)]
struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

async fn recent(
    State(service): State<Service>,
    Query(q): Query<RecentQuery>,
) -> ApiResult<Vec<ClientRecord>> {
    Ok(Json(service.recent_clients(q.limit).await?))
}
