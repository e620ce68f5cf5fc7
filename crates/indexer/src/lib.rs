//! HTTP client for the Firebase-backed vault index.
//!
//! Implements the [`VaultIndex`] capability over the web backend's API.
//! Indexing is a best-effort side channel: callers log failures at warning
//! level and keep going — an index error never becomes the user-facing
//! outcome of a vault operation.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use sudostake_core::{IndexerError, LenderPosition, PendingRequest, VaultIndex};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the vault indexing/listing API.
pub struct IndexApiClient {
    http: reqwest::Client,
    base_url: String,
    factory_id: String,
}

#[derive(Debug, Serialize)]
struct IndexVaultPayload<'a> {
    factory_id: &'a str,
    vault: &'a str,
    tx_hash: &'a str,
}

impl IndexApiClient {
    /// `base_url` is the API root (no trailing slash); `factory_id` scopes
    /// every request to the active network's factory contract.
    pub fn new(base_url: impl Into<String>, factory_id: impl Into<String>) -> Self {
        IndexApiClient {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            factory_id: factory_id.into(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }

    async fn get_json(
        &self,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, IndexerError> {
        let response = self
            .http
            .get(self.endpoint(name))
            .query(params)
            .send()
            .await
            .map_err(|e| IndexerError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndexerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| IndexerError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl VaultIndex for IndexApiClient {
    async fn index_vault(&self, vault_id: &str, tx_hash: &str) -> Result<(), IndexerError> {
        debug!(vault_id, tx_hash, "Indexing vault");
        let payload = IndexVaultPayload {
            factory_id: &self.factory_id,
            vault: vault_id,
            tx_hash,
        };
        let response = self
            .http
            .post(self.endpoint("index_vault"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| IndexerError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndexerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn pending_requests(
        &self,
        factory_id: &str,
    ) -> Result<Vec<PendingRequest>, IndexerError> {
        let value = self
            .get_json("view_pending_liquidity_requests", &[("factory_id", factory_id)])
            .await?;
        serde_json::from_value(value).map_err(|e| IndexerError::InvalidBody(e.to_string()))
    }

    async fn lender_positions(
        &self,
        factory_id: &str,
        lender_id: &str,
    ) -> Result<Vec<LenderPosition>, IndexerError> {
        let value = self
            .get_json(
                "view_lender_positions",
                &[("factory_id", factory_id), ("lender_id", lender_id)],
            )
            .await?;
        serde_json::from_value(value).map_err(|e| IndexerError::InvalidBody(e.to_string()))
    }
}
