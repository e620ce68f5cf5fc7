//! Open a liquidity request against a vault's staked NEAR.

use crate::ctx::{required_str, required_u64, ToolCtx};
use crate::token::scale_up;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult, GAS_300_TGAS, YOCTO_1};
use sudostake_outcome::{
    classify_panic, contract_panic_reply, extract_failure, log_contains_event,
    rpc_connectivity_hint, unexpected_error_reply, Operation,
};
use tracing::error;

const SECONDS_PER_DAY: u64 = 86_400;
const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

pub struct RequestLiquidityTool {
    ctx: Arc<ToolCtx>,
}

struct RequestArgs {
    vault_id: String,
    amount: u64,
    denom: String,
    interest: u64,
    duration_days: u64,
    collateral_near: u64,
}

impl RequestLiquidityTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self, args: &RequestArgs) -> (bool, String) {
        let ctx = &self.ctx;
        if let Some(refusal) = ctx.signing_gate() {
            return (false, refusal);
        }

        let meta = match ctx.tokens.by_denom(&args.denom) {
            Some(meta) => meta,
            None => {
                return (
                    false,
                    format!(
                        "❌ Liquidity request failed\n\n**Error:** unsupported token \
                         denomination `{}`",
                        args.denom
                    ),
                );
            }
        };

        let terms = json!({
            "token": meta.contract,
            "amount": scale_up(args.amount, meta.decimals).to_string(),
            "interest": scale_up(args.interest, meta.decimals).to_string(),
            "collateral": (u128::from(args.collateral_near) * YOCTO_PER_NEAR).to_string(),
            "duration": args.duration_days * SECONDS_PER_DAY,
        });

        let tx = match ctx
            .near
            .call(
                &args.vault_id,
                "request_liquidity",
                terms,
                GAS_300_TGAS,
                YOCTO_1,
            )
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                error!(vault_id = %args.vault_id, error = %err, "request_liquidity call failed");
                let text = err.to_string();
                let hint = rpc_connectivity_hint(&text, &args.vault_id, ctx.session.network);
                return (
                    false,
                    unexpected_error_reply("liquidity request", &text, hint.as_deref()),
                );
            }
        };

        if let Some(failure) = extract_failure(&tx.status) {
            let reply = classify_panic(Operation::RequestLiquidity, &failure, &args.vault_id)
                .unwrap_or_else(|| {
                    contract_panic_reply(
                        "❌ Liquidity Request failed with **contract panic**:",
                        &failure,
                    )
                });
            return (false, reply);
        }

        // The contract reports a collateral shortfall as a log event, not
        // a panic.
        if log_contains_event(&tx.logs, "liquidity_request_failed_insufficient_stake") {
            return (
                false,
                "❌ Liquidity Request failed\n\
                 > You may not have enough staked NEAR to cover the collateral."
                    .to_string(),
            );
        }

        ctx.index_vault_best_effort(&args.vault_id, &tx.transaction_hash)
            .await;

        let explorer = ctx.explorer();
        let vault_id = &args.vault_id;
        let hash = &tx.transaction_hash;
        (
            true,
            format!(
                "💧 **Liquidity Request Submitted**\n\
                 - 🏦 Vault: [`{vault_id}`]({explorer}/accounts/{vault_id})\n\
                 - 💵 Amount: `{}` ({})\n\
                 - 📈 Interest: `{}` {}\n\
                 - ⏳ Duration: `{}` days\n\
                 - 💰 Collateral: `{}` NEAR\n\
                 - 🔗 Tx: [{hash}]({explorer}/transactions/{hash})",
                args.amount,
                meta.symbol,
                args.interest,
                meta.symbol,
                args.duration_days,
                args.collateral_near,
            ),
        )
    }
}

#[async_trait]
impl Tool for RequestLiquidityTool {
    fn name(&self) -> &str {
        "request_liquidity"
    }

    fn description(&self) -> &str {
        "Open a liquidity request on a vault: borrow a token amount against \
         staked NEAR collateral, at a fixed interest, for a fixed duration."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "vault_id": {
                    "type": "string",
                    "description": "Vault account ID, e.g. vault-0.factory.testnet"
                },
                "amount": {
                    "type": "integer",
                    "description": "Requested loan amount in whole tokens"
                },
                "denom": {
                    "type": "string",
                    "description": "Token denomination, e.g. \"usdc\""
                },
                "interest": {
                    "type": "integer",
                    "description": "Interest in the same denomination as amount"
                },
                "duration": {
                    "type": "integer",
                    "description": "Loan duration in days"
                },
                "collateral": {
                    "type": "integer",
                    "description": "Collateral in whole NEAR"
                }
            },
            "required": ["vault_id", "amount", "denom", "interest", "duration", "collateral"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args = RequestArgs {
            vault_id: required_str(&arguments, "vault_id")?,
            amount: required_u64(&arguments, "amount")?,
            denom: required_str(&arguments, "denom")?,
            interest: required_u64(&arguments, "interest")?,
            duration_days: required_u64(&arguments, "duration")?,
            collateral_near: required_u64(&arguments, "collateral")?,
        };
        let (success, text) = self.run(&args).await;
        Ok(self.ctx.deliver(success, text))
    }
}
