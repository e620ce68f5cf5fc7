//! Transfer NEAR from the signing account to a vault.

use crate::ctx::{required_str, ToolCtx};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult};
use sudostake_outcome::rpc_connectivity_hint;
use tracing::error;

pub struct TransferNearTool {
    ctx: Arc<ToolCtx>,
}

impl TransferNearTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self, vault_id: &str, amount: &str) -> (bool, String) {
        let ctx = &self.ctx;
        if let Some(refusal) = ctx.signing_gate() {
            return (false, refusal);
        }

        let vault_id = vault_id.trim();
        if vault_id.is_empty() {
            return (false, "❌ Invalid vault account: value is empty.".to_string());
        }

        let amount = amount.trim();
        let yocto = match crate::token::parse_near_amount(amount) {
            Some(yocto) => yocto,
            None => {
                return (
                    false,
                    format!(
                        "❌ Invalid amount: `{amount}`\n\
                         Enter a positive number like `0.5`, `2`, or `10.25`."
                    ),
                )
            }
        };
        if yocto == 0 {
            return (
                false,
                "❌ Amount must be greater than 0.\n\
                 Examples: `0.5`, `2`, `10.25`"
                    .to_string(),
            );
        }

        // Best-effort pre-flight: refuse a transfer the signer cannot cover.
        // A failed balance lookup falls through to the transfer itself.
        if let Ok(balance) = ctx.near.get_balance().await {
            if balance < yocto {
                return (
                    false,
                    format!(
                        "❌ Insufficient NEAR balance.\n\
                         - Available: **{} NEAR**\n\
                         - Requested: **{} NEAR**\n\
                         Top up the account and retry.",
                        crate::token::near_fixed5(balance),
                        crate::token::near_fixed5(yocto),
                    ),
                );
            }
        }

        let tx = match ctx.near.send_money(vault_id, yocto).await {
            Ok(tx) => tx,
            Err(err) => {
                error!(vault_id, amount, error = %err, "transfer failed");
                let text = err.to_string();
                let mut reply = format!(
                    "❌ Transfer failed for `{vault_id}` ({amount} NEAR)\n\n**Error:** {err}"
                );
                if let Some(hint) = rpc_connectivity_hint(&text, vault_id, ctx.session.network) {
                    reply.push_str("\n\n");
                    reply.push_str(&hint);
                }
                return (false, reply);
            }
        };

        let explorer = ctx.explorer();
        let hash = &tx.transaction_hash;
        (
            true,
            format!(
                "💸 **Transfer Submitted**\n\
                 Sent **{} NEAR** to `{vault_id}`.\n\
                 🔹 Account: [{vault_id}]({explorer}/accounts/{vault_id})\n\
                 🔹 Tx: [{hash}]({explorer}/transactions/{hash})",
                crate::token::near_fixed5(yocto),
            ),
        )
    }
}

#[async_trait]
impl Tool for TransferNearTool {
    fn name(&self) -> &str {
        "transfer_near_to_vault"
    }

    fn description(&self) -> &str {
        "Transfer NEAR from the signing account to a vault. The amount is \
         given in whole NEAR, e.g. `0.5` or `10.25`."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "vault_id": {
                    "type": "string",
                    "description": "Receiving vault account ID"
                },
                "amount": {
                    "type": "string",
                    "description": "Amount in NEAR, e.g. 0.5"
                }
            },
            "required": ["vault_id", "amount"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let vault_id = required_str(&arguments, "vault_id")?;
        let amount = required_str(&arguments, "amount")?;
        let (success, text) = self.run(&vault_id, &amount).await;
        Ok(self.ctx.deliver(success, text))
    }
}
