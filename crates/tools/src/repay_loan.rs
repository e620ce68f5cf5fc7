//! Repay an active loan from the vault's balance.

use crate::ctx::{required_str, ToolCtx};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult, GAS_300_TGAS, YOCTO_1};
use sudostake_outcome::{
    classify_panic, contract_panic_reply, extract_failure, log_contains_event,
    repay_success_reply, rpc_connectivity_hint, unexpected_error_reply, Operation,
};
use tracing::error;

pub struct RepayLoanTool {
    ctx: Arc<ToolCtx>,
}

impl RepayLoanTool {
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
            .call(vault_id, "repay_loan", json!({}), GAS_300_TGAS, YOCTO_1)
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                error!(vault_id, error = %err, "repay_loan call failed");
                let text = err.to_string();
                let hint = rpc_connectivity_hint(&text, vault_id, ctx.session.network);
                return (
                    false,
                    unexpected_error_reply("loan repayment", &text, hint.as_deref()),
                );
            }
        };

        if let Some(failure) = extract_failure(&tx.status) {
            let reply = classify_panic(Operation::RepayLoan, &failure, vault_id)
                .unwrap_or_else(|| {
                    contract_panic_reply(
                        "❌ Loan repayment failed due to contract panic:",
                        &failure,
                    )
                });
            return (false, reply);
        }

        // On-chain success can still carry a transfer failure in the logs.
        if log_contains_event(&tx.logs, "repay_loan_failed") {
            return (
                false,
                "❌ Loan repayment failed. Funds could not be transferred to the lender."
                    .to_string(),
            );
        }

        ctx.index_vault_best_effort(vault_id, &tx.transaction_hash).await;
        (
            true,
            repay_success_reply(ctx.explorer(), vault_id, &tx.transaction_hash),
        )
    }
}

#[async_trait]
impl Tool for RepayLoanTool {
    fn name(&self) -> &str {
        "repay_loan"
    }

    fn description(&self) -> &str {
        "Repay the active loan on a vault. Transfers the owed token amount \
         back to the lender and closes the position."
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
