//! List vaults with open liquidity requests from the backend index.

use crate::ctx::ToolCtx;
use crate::token::whole_units;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{Tool, ToolResult};
use tracing::warn;

const SECONDS_PER_DAY: u64 = 86_400;

pub struct PendingRequestsTool {
    ctx: Arc<ToolCtx>,
}

impl PendingRequestsTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self) -> (bool, String) {
        let ctx = &self.ctx;
        let pending = match ctx.index.pending_requests(&ctx.profile.factory_id).await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(error = %err, "view_pending_liquidity_requests failed");
                return (
                    false,
                    format!("❌ Failed to fetch pending liquidity requests\n\n**Error:** {err}"),
                );
            }
        };

        if pending.is_empty() {
            return (true, "✅ No pending liquidity requests found.".to_string());
        }

        let mut message = String::from("**📋 Pending Liquidity Requests**\n\n");
        for item in &pending {
            let terms = &item.liquidity_request;
            let (amount, interest, symbol) = match ctx.tokens.by_contract(&terms.token) {
                Some(meta) => (
                    whole_units(&terms.amount, meta.decimals)
                        .unwrap_or_else(|| terms.amount.clone()),
                    whole_units(&terms.interest, meta.decimals)
                        .unwrap_or_else(|| terms.interest.clone()),
                    meta.symbol.clone(),
                ),
                None => (terms.amount.clone(), terms.interest.clone(), String::new()),
            };
            let collateral =
                whole_units(&terms.collateral, 24).unwrap_or_else(|| terms.collateral.clone());
            let duration_days = terms.duration / SECONDS_PER_DAY;

            message.push_str(&format!("- 🏦 `{}`\n", item.id));
            message.push_str(&format!("  • Token: `{}`\n", terms.token));
            message.push_str(&format!("  • Amount: `{amount}` {symbol}\n"));
            message.push_str(&format!("  • Interest: `{interest}` {symbol}\n"));
            message.push_str(&format!("  • Duration: `{duration_days} days`\n"));
            message.push_str(&format!("  • Collateral: `{collateral}` NEAR\n\n"));
        }

        (true, message)
    }
}

#[async_trait]
impl Tool for PendingRequestsTool {
    fn name(&self) -> &str {
        "view_pending_liquidity_requests"
    }

    fn description(&self) -> &str {
        "List all vaults with open liquidity requests on the current network, \
         with their requested amount, interest, duration, and collateral."
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
