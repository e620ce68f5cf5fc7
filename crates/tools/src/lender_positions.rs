//! List the caller's active lending positions, enriched with timing and
//! liquidation status.
//!
//! Listing data comes from the backend index; on-chain `get_vault_state`
//! is only consulted for expired positions (claims-eligible), and those
//! views are prefetched concurrently.

use crate::ctx::ToolCtx;
use crate::token::{format_scaled, format_with_digits};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use sudostake_core::error::ToolError;
use sudostake_core::{LenderPosition, Tool, ToolResult, VaultState};
use tracing::warn;

const SECONDS_PER_DAY: i64 = 86_400;

pub struct LenderPositionsTool {
    ctx: Arc<ToolCtx>,
}

struct Enriched {
    position: LenderPosition,
    expiry_secs: Option<i64>,
    seconds_left: Option<i64>,
    expired: bool,
}

impl LenderPositionsTool {
    pub fn new(ctx: Arc<ToolCtx>) -> Self {
        Self { ctx }
    }

    async fn run(&self) -> (bool, String) {
        let ctx = &self.ctx;
        let Some(lender_id) = ctx.session.account_id.clone() else {
            return (
                false,
                "⚠️ No account ID available. Set `NEAR_ACCOUNT_ID` in secrets, then try again."
                    .to_string(),
            );
        };

        let positions = match ctx
            .index
            .lender_positions(&ctx.profile.factory_id, &lender_id)
            .await
        {
            Ok(positions) => positions,
            Err(err) => {
                warn!(error = %err, "view_lender_positions failed");
                return (
                    false,
                    format!("❌ Failed to fetch lending positions\n\n**Error:** {err}"),
                );
            }
        };

        if positions.is_empty() {
            return (true, "✅ You have no active lending positions.".to_string());
        }

        let mut enriched = enrich(positions, Utc::now().timestamp());
        // Expired positions first, then soonest to expire.
        enriched.sort_by_key(|e| (!e.expired, e.expiry_secs.unwrap_or(0)));

        let states = self.prefetch_states(&enriched).await;

        let mut reply = format!("**📄 Active Lending Positions for `{lender_id}`**\n");
        for entry in &enriched {
            let state = states.get(&entry.position.id).and_then(|s| s.as_ref());
            reply.push_str(&self.format_entry(entry, state));
        }
        (true, reply)
    }

    /// Fetch `get_vault_state` for every expired position concurrently.
    /// A failed view degrades that entry to "Liquidation: Unknown".
    async fn prefetch_states(&self, enriched: &[Enriched]) -> HashMap<String, Option<VaultState>> {
        let expired_ids: Vec<&str> = enriched
            .iter()
            .filter(|e| e.expired)
            .map(|e| e.position.id.as_str())
            .collect();

        let views = join_all(expired_ids.iter().map(|vault_id| {
            self.ctx
                .near
                .view(vault_id, "get_vault_state", json!({}))
        }))
        .await;

        expired_ids
            .iter()
            .zip(views)
            .map(|(vault_id, outcome)| {
                let state = match outcome {
                    Ok(view) => view
                        .result
                        .and_then(|v| serde_json::from_value::<VaultState>(v).ok()),
                    Err(err) => {
                        warn!(vault_id, error = %err, "prefetch get_vault_state failed");
                        None
                    }
                };
                (vault_id.to_string(), state)
            })
            .collect()
    }

    fn format_entry(&self, entry: &Enriched, state: Option<&VaultState>) -> String {
        let ctx = &self.ctx;
        let pos = &entry.position;
        let terms = &pos.liquidity_request;
        let (decimals, symbol) = match ctx.tokens.by_contract(&terms.token) {
            Some(meta) => (meta.decimals, meta.symbol.clone()),
            None => (0, String::new()),
        };

        let principal_raw: Option<u128> = terms.amount.parse().ok();
        let interest_raw: Option<u128> = terms.interest.parse().ok();
        let principal =
            format_scaled(&terms.amount, decimals, 2).unwrap_or_else(|| terms.amount.clone());
        let interest =
            format_scaled(&terms.interest, decimals, 2).unwrap_or_else(|| terms.interest.clone());
        let total = match (principal_raw, interest_raw) {
            (Some(p), Some(i)) => format_scaled(&(p + i).to_string(), decimals, 2)
                .unwrap_or_default(),
            _ => "N/A".to_string(),
        };
        let collateral =
            format_scaled(&terms.collateral, 24, 2).unwrap_or_else(|| terms.collateral.clone());
        let duration_days = terms.duration / SECONDS_PER_DAY as u64;
        let apr = apr_text(principal_raw, interest_raw, duration_days);

        let accepted = pos
            .accepted_offer
            .accepted_at
            .as_ref()
            .and_then(firestore_seconds)
            .and_then(epoch_to_utc)
            .unwrap_or_else(|| "Unknown".to_string());
        let expires = entry
            .expiry_secs
            .and_then(epoch_to_utc)
            .unwrap_or_else(|| "Unknown".to_string());
        let time_left = entry
            .seconds_left
            .map(format_time_left)
            .unwrap_or_else(|| "Unknown".to_string());

        let eligible = if entry.expired { "Yes" } else { "No" };
        let action = if entry.expired {
            "Process claims to repay in NEAR."
        } else {
            "Wait; borrower may repay in token."
        };

        let liquidation_block = if entry.expired {
            liquidation_lines(state, &terms.collateral)
        } else {
            String::new()
        };
        let quick_action = if entry.expired {
            format!("  • Quick action: `Process claims on {}`\n", pos.id)
        } else {
            String::new()
        };

        let explorer = ctx.explorer();
        let owner = pos.owner.as_deref().unwrap_or("unknown");
        let mut block = format!("- Vault: [`{}`]({explorer}/accounts/{})\n", pos.id, pos.id);
        block.push_str(&format!("  • Borrower: `{owner}`\n"));
        block.push_str(&format!("  • Token: {symbol} (`{}`)\n", terms.token));
        block.push_str(&format!(
            "  • Principal: `{principal}` {symbol} • Interest: `{interest}` {symbol} • Total: `{total}` {symbol}\n"
        ));
        block.push_str(&format!("  • Collateral: `{collateral}` NEAR\n"));
        block.push_str(&format!("  • APR: {apr}\n"));
        block.push_str(&format!("  • Duration: `{duration_days} days`\n"));
        block.push_str(&format!(
            "  • Accepted: `{accepted}` • Expires: `{expires}` • Time left: `{time_left}`\n"
        ));
        block.push_str(&format!("  • Claims eligible: `{eligible}`\n"));
        block.push_str(&format!("  • Action: {action}\n"));
        block.push_str(&liquidation_block);
        block.push_str(&quick_action);
        block.push('\n');
        block
    }
}

fn enrich(positions: Vec<LenderPosition>, now_secs: i64) -> Vec<Enriched> {
    positions
        .into_iter()
        .map(|position| {
            let accepted_secs = position
                .accepted_offer
                .accepted_at
                .as_ref()
                .and_then(firestore_seconds);
            let expiry_secs =
                accepted_secs.map(|secs| secs + position.liquidity_request.duration as i64);
            let seconds_left = expiry_secs.map(|expiry| expiry - now_secs);
            Enriched {
                position,
                expiry_secs,
                seconds_left,
                expired: seconds_left.is_some_and(|left| left <= 0),
            }
        })
        .collect()
}

/// Accept a Firestore-style `{"_seconds": ...}` object or a plain
/// integer/string epoch value.
fn firestore_seconds(value: &Value) -> Option<i64> {
    let inner = match value {
        Value::Object(map) => map.get("_seconds")?,
        other => other,
    };
    match inner {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn epoch_to_utc(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// "Xd Yh Zm"; floors to "0m" when nothing is left.
fn format_time_left(seconds_left: i64) -> String {
    if seconds_left <= 0 {
        return "0m".to_string();
    }
    let days = seconds_left / SECONDS_PER_DAY;
    let hours = (seconds_left % SECONDS_PER_DAY) / 3600;
    let minutes = (seconds_left % 3600) / 60;
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    parts.push(format!("{minutes}m"));
    parts.join(" ")
}

fn apr_text(principal_raw: Option<u128>, interest_raw: Option<u128>, duration_days: u64) -> String {
    let (Some(principal), Some(interest)) = (principal_raw, interest_raw) else {
        return "N/A".to_string();
    };
    if principal == 0 || duration_days == 0 {
        return "N/A".to_string();
    }
    // interest / principal * 365 / days * 100, in hundredths of a percent.
    let denominator = principal * u128::from(duration_days);
    let hundredths = (interest * 3_650_000 + denominator / 2) / denominator;
    format!("{}%", format_with_digits(hundredths, 2))
}

fn liquidation_lines(state: Option<&VaultState>, fallback_collateral: &str) -> String {
    let Some(state) = state else {
        return "  • Liquidation: Unknown\n".to_string();
    };
    let Some(liquidation) = &state.liquidation else {
        return "  • Liquidation: Not started\n".to_string();
    };

    let liquidated_raw = liquidation.liquidated.as_deref().unwrap_or("0");
    let total_raw = state
        .liquidity_request
        .as_ref()
        .map(|r| r.collateral.as_str())
        .unwrap_or(fallback_collateral);
    let liquidated = format_scaled(liquidated_raw, 24, 5).unwrap_or_else(|| "0".to_string());
    let total = format_scaled(total_raw, 24, 5).unwrap_or_else(|| total_raw.to_string());
    format!(
        "  • Liquidation: In progress\n  • Liquidated so far: `{liquidated}` NEAR of `{total}` NEAR\n"
    )
}

#[async_trait]
impl Tool for LenderPositionsTool {
    fn name(&self) -> &str {
        "view_lender_positions"
    }

    fn description(&self) -> &str {
        "Show every vault where the current account is the lender of an \
         active loan, with expiry, APR, and liquidation status."
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firestore_seconds_accepts_known_shapes() {
        assert_eq!(firestore_seconds(&json!({"_seconds": 1700000000})), Some(1_700_000_000));
        assert_eq!(firestore_seconds(&json!({"_seconds": "1700000000"})), Some(1_700_000_000));
        assert_eq!(firestore_seconds(&json!(1700000000)), Some(1_700_000_000));
        assert_eq!(firestore_seconds(&json!("1700000000")), Some(1_700_000_000));
        assert_eq!(firestore_seconds(&json!({"nanos": 5})), None);
        assert_eq!(firestore_seconds(&json!(null)), None);
    }

    #[test]
    fn time_left_floors_and_composes() {
        assert_eq!(format_time_left(-30), "0m");
        assert_eq!(format_time_left(0), "0m");
        assert_eq!(format_time_left(59), "0m");
        assert_eq!(format_time_left(3_660), "1h 1m");
        assert_eq!(format_time_left(90_000), "1d 1h 0m");
    }

    #[test]
    fn apr_for_round_terms() {
        // 1000 principal, 50 interest, 365 days → 5%
        assert_eq!(apr_text(Some(1_000_000_000), Some(50_000_000), 365), "5%");
        // 30-day loan at the same rate annualizes up
        assert_eq!(apr_text(Some(1_000_000_000), Some(50_000_000), 30), "60.83%");
        assert_eq!(apr_text(Some(0), Some(50), 30), "N/A");
        assert_eq!(apr_text(None, Some(50), 30), "N/A");
        assert_eq!(apr_text(Some(1_000), Some(50), 0), "N/A");
    }
}
