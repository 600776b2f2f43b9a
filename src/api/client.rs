//! Async client for the catalog web service.
//!
//! [`CatalogApi`] is the seam the fetch worker depends on. [`PokeApiClient`]
//! implements it over HTTP with `reqwest`; tests substitute in-process fakes.

use crate::api::wire::{PageListing, RecordPayload};
use crate::domain::error::{DexError, Result};
use crate::domain::RecordDetails;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Read-only contract of the consumed service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one window of the listing: `GET /pokemon?limit={limit}&offset={offset}`.
    ///
    /// # Errors
    ///
    /// Returns a fetch failure on transport errors, non-success status, or an
    /// unexpected body.
    async fn list(&self, limit: u32, offset: u32) -> Result<PageListing>;

    /// Fetches full details from a per-item URL returned by [`CatalogApi::list`].
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogApi::list`].
    async fn record_at(&self, url: &str) -> Result<RecordDetails>;

    /// Fetches full details by identifier: `GET /pokemon/{id}/`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogApi::list`].
    async fn record(&self, id: u32) -> Result<RecordDetails>;
}

/// HTTP implementation of [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Builds a client rooted at `base_url` with a per-request timeout.
    ///
    /// A trailing slash on `base_url` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Http`] if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dexview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Root URL every request is built from.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url = %url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| DexError::Decode(format!("{url}: {e}")))
    }
}

#[async_trait]
impl CatalogApi for PokeApiClient {
    async fn list(&self, limit: u32, offset: u32) -> Result<PageListing> {
        let url = format!("{}/pokemon?limit={limit}&offset={offset}", self.base_url);
        self.get_json(&url).await
    }

    async fn record_at(&self, url: &str) -> Result<RecordDetails> {
        let payload: RecordPayload = self.get_json(url).await?;
        Ok(payload.into())
    }

    async fn record(&self, id: u32) -> Result<RecordDetails> {
        let url = format!("{}/pokemon/{id}/", self.base_url);
        self.record_at(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client =
            PokeApiClient::new("https://pokeapi.co/api/v2/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
    }
}
