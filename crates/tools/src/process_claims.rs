//! Advance liquidation of an expired loan by one claims step.

use crate::ctx::{required_str, ToolCtx};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult, GAS_300_TGAS, YOCTO_1};
use sudostake_outcome::{
    classify_panic, compose_claims_reply, contract_panic_reply, extract_failure,
    rpc_connectivity_hint, unexpected_error_reply, LiquidationView, Operation,
};
use tracing::error;

pub struct ProcessClaimsTool {
    ctx: Arc<ToolCtx>,
}

impl ProcessClaimsTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self, vault_id: &str) -> (bool, String) {
        let ctx = &self.ctx;
        if let Some(refusal) = ctx.signing_gate() {
            return (false, refusal);
        }

        let tx = match ctx
            .near
            .call(vault_id, "process_claims", json!({}), GAS_300_TGAS, YOCTO_1)
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                error!(vault_id, error = %err, "process_claims call failed");
                let text = err.to_string();
                let hint = rpc_connectivity_hint(&text, vault_id, ctx.session.network);
                return (
                    false,
                    unexpected_error_reply("claims processing", &text, hint.as_deref()),
                );
            }
        };

        if let Some(failure) = extract_failure(&tx.status) {
            let reply = classify_panic(Operation::ProcessClaims, &failure, vault_id)
                .unwrap_or_else(|| {
                    contract_panic_reply(
                        "❌ Processing claims failed due to contract panic:",
                        &failure,
                    )
                });
            return (false, reply);
        }

        ctx.index_vault_best_effort(vault_id, &tx.transaction_hash).await;

        let view = LiquidationView::from_logs(&tx.logs);
        (
            true,
            compose_claims_reply(ctx.explorer(), vault_id, &tx.transaction_hash, &view),
        )
    }
}

#[async_trait]
impl Tool for ProcessClaimsTool {
    fn name(&self) -> &str {
        "process_claims"
    }

    fn description(&self) -> &str {
        "Process claims on a vault whose loan has expired. Each call advances \
         liquidation: matured NEAR is repaid to the lender, and unstaking is \
         scheduled for the rest."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "vault_id": {
                    "type": "string",
                    "description": "Vault account ID, e.g. vault-0.factory.testnet"
                }
            },
            "required": ["vault_id"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let vault_id = required_str(&arguments, "vault_id")?;
        let (success, text) = self.run(&vault_id).await;
        Ok(self.ctx.deliver(success, text))
    }
}
