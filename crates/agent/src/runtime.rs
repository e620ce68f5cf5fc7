//! Session construction and tool dispatch for one conversation.

use crate::prompt;
use std::sync::Arc;
use sudostake_config::AgentConfig;
use sudostake_core::error::ToolError;
use sudostake_core::{
    ChatMessage, Environment, Session, ToolCall, ToolDefinition, ToolRegistry, ToolResult,
};
use sudostake_indexer::IndexApiClient;
use sudostake_near::{JsonRpcClient, TransactionSigner};
use sudostake_tools::{catalog, ToolCtx};
use tracing::info;

/// Wires the configured network profile, session, and tool catalog
/// together for the hosting runtime.
pub struct AgentRuntime {
    ctx: Arc<ToolCtx>,
    registry: ToolRegistry,
}

impl AgentRuntime {
    /// Build a runtime from config. The session is headless only when the
    /// config carries signing keys **and** a signer implementation is
    /// injected; otherwise every state-changing tool refuses politely and
    /// the read tools still work.
    pub fn new(
        config: &AgentConfig,
        env: Arc<dyn Environment>,
        signer: Option<Arc<dyn TransactionSigner>>,
    ) -> Self {
        let profile = config.profile();
        let session = match (&signer, &config.account_id) {
            (Some(_), Some(account_id)) => Session::headless(account_id.clone(), profile.network),
            _ => Session::view_only(profile.network),
        };
        info!(
            network = %profile.network,
            signing_mode = ?session.signing_mode,
            "agent session initialized"
        );

        let mut rpc = JsonRpcClient::new(profile.rpc_url.clone());
        if let Some(signer) = signer {
            rpc = rpc.with_signer(signer);
        }
        let near = Arc::new(rpc);
        let index = Arc::new(IndexApiClient::new(
            profile.index_api_base.clone(),
            profile.factory_id.clone(),
        ));

        let ctx = Arc::new(
            ToolCtx::new(env, near, index, session, profile)
                .with_mint_fee(config.vault_mint_fee_near)
                .with_vector_store(config.vector_store_id.clone()),
        );
        let registry = catalog(ctx.clone());
        Self { ctx, registry }
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    /// Definitions for every registered tool, in stable name order.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    /// Assemble the message list for the next LM call.
    pub async fn assemble_prompt(&self) -> Vec<ChatMessage> {
        prompt::assemble_prompt(self.ctx.env.as_ref(), &self.ctx.vector_store_id).await
    }

    /// Dispatch one tool call coming back from the LM.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        self.registry.execute(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleEnvironment;
    use sudostake_core::SigningMode;

    #[test]
    fn config_without_keys_yields_a_view_only_session() {
        let config = AgentConfig::default();
        let runtime = AgentRuntime::new(&config, Arc::new(ConsoleEnvironment::new()), None);

        assert_eq!(runtime.session().signing_mode, SigningMode::ViewOnly);
        assert!(runtime.session().account_id.is_none());
    }

    #[test]
    fn registers_the_full_catalog() {
        let config = AgentConfig::default();
        let runtime = AgentRuntime::new(&config, Arc::new(ConsoleEnvironment::new()), None);

        let names: Vec<String> = runtime
            .tool_definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "accept_liquidity_request",
                "mint_vault",
                "process_claims",
                "query_sudostake_docs",
                "register_account_with_token",
                "repay_loan",
                "request_liquidity",
                "transfer_near_to_vault",
                "view_lender_positions",
                "view_pending_liquidity_requests",
            ]
        );
    }
}
