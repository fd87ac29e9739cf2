//! Remote record store.
//!
//! Talks to a couture REST server (or any server speaking the same contract)
//! with one request per operation. No retries: a failed call surfaces as
//! [`StoreError::Unavailable`] and the caller decides whether to try again.
//!
//! # Example
//!
//! ```no_run
//! use couture_store::HttpStore;
//!
//! let store = HttpStore::new("http://localhost:4000").unwrap();
//! ```

use std::time::Duration;

use async_trait::async_trait;
use couture_core::API_CLIENTS_PATH;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::StoreError;
use crate::record::{ClientPatch, ClientRecord, NewClient};
use crate::traits::ClientStore;

/// HTTP record store.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    clients_url: Url,
}

impl HttpStore {
    /// Create a store for the server at `base_url` (e.g. `http://localhost:4000`).
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a store whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create with a custom reqwest [`Client`] (for proxies, TLS settings, etc.).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, StoreError> {
        let mut clients_url = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidLocation(format!("{base_url}: {e}")))?;
        {
            let mut segments = clients_url
                .path_segments_mut()
                .map_err(|()| StoreError::InvalidLocation(base_url.to_string()))?;
            segments.pop_if_empty();
            segments.extend(API_CLIENTS_PATH.split('/').filter(|s| !s.is_empty()));
        }
        Ok(Self {
            client,
            clients_url,
        })
    }

    /// Collection endpoint, e.g. `http://localhost:4000/api/clients`.
    pub fn clients_url(&self) -> &Url {
        &self.clients_url
    }

    fn record_url(&self, id: &str) -> Url {
        let mut url = self.clients_url.clone();
        // clients_url was validated as a base URL in the constructor.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    /// Map a non-success response to an error, keeping the server's message.
    async fn failure(resp: Response) -> StoreError {
        let status = resp.status();
        let detail = resp
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_default();
        if detail.is_empty() {
            StoreError::Unavailable(format!("HTTP {}", status.as_u16()))
        } else {
            StoreError::Unavailable(format!("HTTP {}: {}", status.as_u16(), detail))
        }
    }

    async fn decode_optional(resp: Response) -> Result<Option<ClientRecord>, StoreError> {
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(resp.json().await?)),
            _ => Err(Self::failure(resp).await),
        }
    }
}

#[async_trait]
impl ClientStore for HttpStore {
    async fn load_all(&self) -> Result<Vec<ClientRecord>, StoreError> {
        debug!(url = %self.clients_url, "GET clients");
        let resp = self.client.get(self.clients_url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(Self::failure(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<ClientRecord>, StoreError> {
        let url = self.record_url(id);
        debug!(%url, "GET client");
        let resp = self.client.get(url).send().await?;
        Self::decode_optional(resp).await
    }

    async fn create_one(&self, client: NewClient) -> Result<ClientRecord, StoreError> {
        debug!(url = %self.clients_url, "POST client");
        let resp = self
            .client
            .post(self.clients_url.clone())
            .json(&client)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::failure(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn replace_fields(
        &self,
        id: &str,
        patch: ClientPatch,
    ) -> Result<Option<ClientRecord>, StoreError> {
        let url = self.record_url(id);
        debug!(%url, "PUT client");
        let resp = self.client.put(url).json(&patch).send().await?;
        Self::decode_optional(resp).await
    }

    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        let url = self.record_url(id);
        debug!(%url, "DELETE client");
        let resp = self.client.delete(url).send().await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Err(Self::failure(resp).await),
        }
    }
}

/// `{ "error": "..." }` body sent with failure statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_url_join() {
        for base in ["http://localhost:4000", "http://localhost:4000/"] {
            let store = HttpStore::new(base).unwrap();
            assert_eq!(
                store.clients_url().as_str(),
                "http://localhost:4000/api/clients"
            );
        }

        let store = HttpStore::new("https://example.com/couture/").unwrap();
        assert_eq!(
            store.clients_url().as_str(),
            "https://example.com/couture/api/clients"
        );
    }

    #[test]
    fn test_record_url_escapes_id() {
        let store = HttpStore::new("http://localhost:4000").unwrap();
        assert_eq!(
            store.record_url("a/b c").as_str(),
            "http://localhost:4000/api/clients/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpStore::new("not a url"),
            Err(StoreError::InvalidLocation(_))
        ));
        assert!(matches!(
            HttpStore::new("mailto:someone@example.com"),
            Err(StoreError::InvalidLocation(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        // Port 9 (discard) on localhost is almost never listening.
        let store =
            HttpStore::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(matches!(
            store.load_all().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
