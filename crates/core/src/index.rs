//! The best-effort indexing/listing side channel.
//!
//! The web backend keeps a Firebase index of vault state for the UI. The
//! agent pushes fresh transaction hashes into it after state-changing calls
//! and reads listing views from it. Indexing failures are logged and
//! swallowed by callers — they must never become the primary user-facing
//! failure.

use crate::error::IndexerError;
use crate::vault::{AcceptedOffer, LiquidityRequestTerms};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A vault with an open, unmatched liquidity request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequest {
    pub id: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub liquidity_request: LiquidityRequestTerms,
}

/// A vault where some lender's offer was accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderPosition {
    pub id: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub liquidity_request: LiquidityRequestTerms,
    pub accepted_offer: AcceptedOffer,
}

/// Indexing/listing API capability.
#[async_trait]
pub trait VaultIndex: Send + Sync {
    /// Ask the backend to re-index `vault_id` after `tx_hash`.
    async fn index_vault(&self, vault_id: &str, tx_hash: &str) -> Result<(), IndexerError>;

    /// Vaults with open liquidity requests under `factory_id`.
    async fn pending_requests(&self, factory_id: &str)
        -> Result<Vec<PendingRequest>, IndexerError>;

    /// Active lending positions for `lender_id` under `factory_id`.
    async fn lender_positions(
        &self,
        factory_id: &str,
        lender_id: &str,
    ) -> Result<Vec<LenderPosition>, IndexerError>;
}
