//! Accept a pending liquidity request as the lender.

use crate::ctx::{required_str, ToolCtx};
use crate::token::whole_units;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult, VaultState, GAS_300_TGAS, YOCTO_1};
use sudostake_outcome::{classify_panic, contract_panic_reply, extract_failure, Operation};
use tracing::error;

pub struct AcceptLiquidityTool {
    ctx: Arc<ToolCtx>,
}

impl AcceptLiquidityTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self, vault_id: &str) -> (bool, String) {
        let ctx = &self.ctx;
        if let Some(refusal) = ctx.signing_gate() {
            return (false, refusal);
        }

        // Pre-flight: read the vault state so we fund only a request that
        // is still open.
        let state = match ctx.near.view(vault_id, "get_vault_state", json!({})).await {
            Ok(view) => match view.result {
                Some(value) => serde_json::from_value::<VaultState>(value).ok(),
                None => None,
            },
            Err(err) => {
                error!(vault_id, error = %err, "get_vault_state failed");
                return (
                    false,
                    format!("❌ Error while accepting liquidity request:\n\n**{err}**"),
                );
            }
        };

        let Some(state) = state else {
            return (
                false,
                format!("❌ No data returned for `{vault_id}`. Is the contract deployed?"),
            );
        };

        let open_request = match (&state.liquidity_request, &state.accepted_offer) {
            (Some(request), None) => request,
            _ => {
                return (
                    false,
                    format!(
                        "❌ `{vault_id}` has no active liquidity request or it has \
                         already been accepted."
                    ),
                );
            }
        };

        let msg_payload = json!({
            "action": "AcceptLiquidityRequest",
            "token": open_request.token,
            "amount": open_request.amount,
            "interest": open_request.interest,
            "collateral": open_request.collateral,
            "duration": open_request.duration,
        });

        let tx = match ctx
            .near
            .call(
                &open_request.token,
                "ft_transfer_call",
                json!({
                    "receiver_id": vault_id,
                    "amount": open_request.amount,
                    "msg": msg_payload.to_string(),
                }),
                GAS_300_TGAS,
                YOCTO_1,
            )
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                error!(vault_id, error = %err, "ft_transfer_call failed");
                return (
                    false,
                    format!("❌ Error while accepting liquidity request:\n\n**{err}**"),
                );
            }
        };

        if let Some(failure) = extract_failure(&tx.status) {
            let reply = classify_panic(Operation::AcceptLiquidity, &failure, vault_id)
                .unwrap_or_else(|| {
                    contract_panic_reply("❌ Failed to accept liquidity request", &failure)
                });
            return (false, reply);
        }

        ctx.index_vault_best_effort(vault_id, &tx.transaction_hash).await;

        let (amount_text, symbol) = match ctx.tokens.by_contract(&open_request.token) {
            Some(meta) => (
                whole_units(&open_request.amount, meta.decimals)
                    .unwrap_or_else(|| open_request.amount.clone()),
                meta.symbol.clone(),
            ),
            None => (open_request.amount.clone(), String::new()),
        };

        let explorer = ctx.explorer();
        let hash = &tx.transaction_hash;
        (
            true,
            format!(
                "✅ **Accepted Liquidity Request**\n\
                 - 🏦 Vault: [`{vault_id}`]({explorer}/accounts/{vault_id})\n\
                 - 🪙 Token: `{}`\n\
                 - 💵 Amount: `{amount_text}` {symbol}\n\
                 - 🔗 Tx: [{hash}]({explorer}/transactions/{hash})",
                open_request.token,
            ),
        )
    }
}

#[async_trait]
impl Tool for AcceptLiquidityTool {
    fn name(&self) -> &str {
        "accept_liquidity_request"
    }

    fn description(&self) -> &str {
        "Accept a vault's pending liquidity request by sending the requested \
         token amount via ft_transfer_call. The caller becomes the lender."
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
