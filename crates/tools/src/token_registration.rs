//! Register an account with the network's token via NEP-145 storage deposit.

use crate::ctx::ToolCtx;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult, GAS_300_TGAS};
use sudostake_outcome::{contract_panic_reply, extract_failure};
use tracing::warn;

/// Storage-deposit fallback (0.00125 NEAR) when the token does not expose
/// `storage_balance_bounds` or returns an unusable response.
const DEFAULT_STORAGE_DEPOSIT_YOCTO: u128 = 1_250_000_000_000_000_000_000;

pub struct TokenRegistrationTool {
    ctx: Arc<ToolCtx>,
}

impl TokenRegistrationTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self, account: &str) -> (bool, String) {
        let ctx = &self.ctx;
        if let Some(refusal) = ctx.signing_gate() {
            return (false, refusal);
        }

        // `me`, `self`, and empty resolve to the signing account.
        let account = account.trim();
        let account = if matches!(account, "" | "me" | "self") {
            match ctx.session.account_id.clone() {
                Some(id) => id,
                None => {
                    return (
                        false,
                        "⚠️ No account ID available. Set `NEAR_ACCOUNT_ID` in secrets, \
                         then try again."
                            .to_string(),
                    )
                }
            }
        } else {
            account.to_string()
        };

        let Some(token) = ctx.tokens.by_denom("usdc") else {
            return (
                false,
                "❌ Failed to register account with token\n\n\
                 **Error:** no token configured for this network"
                    .to_string(),
            );
        };
        let token_contract = token.contract.clone();

        // Short-circuit when the account is already registered.
        if self.storage_balance_of(&token_contract, &account).await.is_some() {
            return (
                true,
                format!("✅ `{account}` is already registered with `{token_contract}`."),
            );
        }

        let deposit = self.storage_min_deposit(&token_contract).await;
        let tx = match ctx
            .near
            .call(
                &token_contract,
                "storage_deposit",
                json!({"account_id": account, "registration_only": true}),
                GAS_300_TGAS,
                deposit,
            )
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                warn!(account = %account, token = %token_contract, error = %err, "storage_deposit failed");
                return (
                    false,
                    format!("❌ Failed to register account with token\n\n**Error:** {err}"),
                );
            }
        };

        if let Some(failure) = extract_failure(&tx.status) {
            return (
                false,
                contract_panic_reply("❌ Failed to register account with token", &failure),
            );
        }

        let explorer = ctx.explorer();
        let hash = &tx.transaction_hash;
        (
            true,
            format!(
                "✅ **Registered Account With Token**\n\
                 - 👤 Account: `{account}`\n\
                 - 🪙 Token: `{token_contract}`\n\
                 - 🔗 Tx: [{hash}]({explorer}/transactions/{hash})"
            ),
        )
    }

    /// The account's storage balance record, or `None` when missing, not
    /// registered, or the token is non-standard. View failures are treated
    /// as "not registered" so the deposit path still runs.
    async fn storage_balance_of(&self, token_contract: &str, account: &str) -> Option<Value> {
        let view = self
            .ctx
            .near
            .view(
                token_contract,
                "storage_balance_of",
                json!({"account_id": account}),
            )
            .await
            .ok()?;
        view.result.filter(Value::is_object)
    }

    /// Minimal required storage deposit in yoctoNEAR, from
    /// `storage_balance_bounds`. Falls back to the NEP-145 default.
    async fn storage_min_deposit(&self, token_contract: &str) -> u128 {
        let bounds = self
            .ctx
            .near
            .view(token_contract, "storage_balance_bounds", json!({}))
            .await;
        let min = match bounds {
            Ok(view) => view.result.and_then(|r| min_field(&r)),
            Err(_) => None,
        };
        min.unwrap_or(DEFAULT_STORAGE_DEPOSIT_YOCTO)
    }
}

fn min_field(bounds: &Value) -> Option<u128> {
    match bounds.get("min")? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}

#[async_trait]
impl Tool for TokenRegistrationTool {
    fn name(&self) -> &str {
        "register_account_with_token"
    }

    fn description(&self) -> &str {
        "Register a NEAR account with the network's USDC token contract via \
         storage_deposit. Use `me` (or omit the account) to register the \
         signing account."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "account": {
                    "type": "string",
                    "description": "NEAR account to register; `me`, `self`, or \
                                    empty registers the signing account"
                }
            }
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let account = arguments
            .get("account")
            .and_then(Value::as_str)
            .unwrap_or("");
        let (success, text) = self.run(account).await;
        Ok(self.ctx.deliver(success, text))
    }
}
