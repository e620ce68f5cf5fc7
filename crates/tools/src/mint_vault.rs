//! Mint a fresh vault from the factory contract.

use crate::ctx::ToolCtx;
use crate::token::near_fixed5;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use sudostake_core::error::{NearError, ToolError};
use sudostake_core::{Tool, ToolResult, GAS_300_TGAS};
use sudostake_outcome::{contract_panic_reply, extract_failure, find_event_data};
use tracing::error;

const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

pub struct MintVaultTool {
    ctx: Arc<ToolCtx>,
}

impl MintVaultTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self) -> (bool, String) {
        let ctx = &self.ctx;
        if let Some(refusal) = ctx.signing_gate() {
            return (false, refusal);
        }

        let fee_yocto = u128::from(ctx.vault_mint_fee_near) * YOCTO_PER_NEAR;
        let tx = match ctx
            .near
            .call(
                &ctx.profile.factory_id,
                "mint_vault",
                json!({}),
                GAS_300_TGAS,
                fee_yocto,
            )
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                if let Some(reply) = self.insufficient_balance_reply(&err) {
                    return (false, reply);
                }
                error!(error = %err, "mint_vault call failed");
                return (false, format!("❌ Vault minting failed\n\n**Error:** {err}"));
            }
        };

        if let Some(failure) = extract_failure(&tx.status) {
            return (
                false,
                contract_panic_reply("❌ Mint vault failed with **contract panic**:", &failure),
            );
        }

        let vault_id = find_event_data(&tx.logs, "vault_minted")
            .and_then(|data| data.get("vault").and_then(Value::as_str).map(str::to_owned));
        let Some(vault_id) = vault_id else {
            return (
                false,
                "❌ Vault minting failed\n\n\
                 **Error:** vault_minted log not found in transaction logs"
                    .to_string(),
            );
        };

        ctx.index_vault_best_effort(&vault_id, &tx.transaction_hash).await;

        let explorer = ctx.explorer();
        let hash = &tx.transaction_hash;
        (
            true,
            format!(
                "🏗️ **Vault Minted**\n\
                 🔑 Vault account: [`{vault_id}`]({explorer}/accounts/{vault_id})\n\
                 🔹 Tx: [{hash}]({explorer}/transactions/{hash})"
            ),
        )
    }

    /// Render a shortfall breakdown when the RPC rejection carries
    /// `balance`/`cost` details, as NotEnoughBalance errors do.
    fn insufficient_balance_reply(&self, err: &NearError) -> Option<String> {
        let NearError::Rpc(body) = err else {
            return None;
        };
        let details: Value = serde_json::from_str(body).ok()?;
        let balance: u128 = yocto_field(&details, "balance")?;
        let cost: u128 = yocto_field(&details, "cost")?;
        let signer = details
            .get("signer_id")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        let shortfall = cost.saturating_sub(balance);
        Some(format!(
            "❌ Insufficient NEAR to mint vault.\n\
             - 👤 Account: `{signer}`\n\
             - Available: **{} NEAR**\n\
             - Required: **{} NEAR**\n\
             - Shortfall: **{} NEAR**\n\n\
             The minting fee is {} NEAR plus gas. Top up and retry.",
            near_fixed5(balance),
            near_fixed5(cost),
            near_fixed5(shortfall),
            self.ctx.vault_mint_fee_near,
        ))
    }
}

fn yocto_field(details: &Value, key: &str) -> Option<u128> {
    match details.get(key)? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}

#[async_trait]
impl Tool for MintVaultTool {
    fn name(&self) -> &str {
        "mint_vault"
    }

    fn description(&self) -> &str {
        "Mint a new staking vault from the factory contract. Costs the fixed \
         minting fee in NEAR plus gas."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let (success, text) = self.run().await;
        Ok(self.ctx.deliver(success, text))
    }
}
