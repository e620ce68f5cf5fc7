//! Shared execution context handed to every tool.

use crate::token::TokenRegistry;
use std::sync::Arc;
use sudostake_config::NetworkProfile;
use sudostake_core::error::ToolError;
use sudostake_core::{Environment, NearClient, Session, ToolResult, VaultIndex};
use tracing::warn;

/// Refusal text for state-changing tools in a view-only session.
pub const NO_SIGNING_KEYS: &str = "⚠️ No signing keys available. Add `NEAR_ACCOUNT_ID` and \
                                   `NEAR_PRIVATE_KEY` to secrets, then try again.";

/// Everything a tool needs: the reply sink, the chain client, the index
/// API, the session identity, and the resolved network profile.
pub struct ToolCtx {
    pub env: Arc<dyn Environment>,
    pub near: Arc<dyn NearClient>,
    pub index: Arc<dyn VaultIndex>,
    pub session: Session,
    pub profile: NetworkProfile,
    pub tokens: TokenRegistry,
    pub vault_mint_fee_near: u64,
    pub vector_store_id: String,
}

impl ToolCtx {
    pub fn new(
        env: Arc<dyn Environment>,
        near: Arc<dyn NearClient>,
        index: Arc<dyn VaultIndex>,
        session: Session,
        profile: NetworkProfile,
    ) -> Self {
        let tokens = TokenRegistry::for_profile(&profile);
        Self {
            env,
            near,
            index,
            session,
            profile,
            tokens,
            vault_mint_fee_near: 10,
            vector_store_id: String::new(),
        }
    }

    pub fn with_mint_fee(mut self, fee_near: u64) -> Self {
        self.vault_mint_fee_near = fee_near;
        self
    }

    pub fn with_vector_store(mut self, store_id: impl Into<String>) -> Self {
        self.vector_store_id = store_id.into();
        self
    }

    pub fn explorer(&self) -> &str {
        &self.profile.explorer_url
    }

    /// The refusal reply for a view-only session, or `None` when signing
    /// is available.
    pub fn signing_gate(&self) -> Option<String> {
        if self.session.can_sign() {
            None
        } else {
            Some(NO_SIGNING_KEYS.to_string())
        }
    }

    /// Push `vault_id` into the backend index. Failures are logged and
    /// swallowed; indexing never changes the primary reply.
    pub async fn index_vault_best_effort(&self, vault_id: &str, tx_hash: &str) {
        if let Err(err) = self.index.index_vault(vault_id, tx_hash).await {
            warn!(vault_id, tx_hash, error = %err, "vault indexing failed");
        }
    }

    /// Deliver `text` as the reply and wrap it in a [`ToolResult`]. The
    /// registry fills in the call ID.
    pub(crate) fn deliver(&self, success: bool, text: String) -> ToolResult {
        self.env.add_reply(&text);
        ToolResult {
            call_id: String::new(),
            success,
            output: text,
        }
    }
}

/// Pull a required string argument out of a tool-call payload.
pub(crate) fn required_str(args: &serde_json::Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing string argument `{key}`")))
}

/// Pull a required non-negative integer argument.
pub(crate) fn required_u64(args: &serde_json::Value, key: &str) -> Result<u64, ToolError> {
    args.get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing integer argument `{key}`")))
}
