//! Known contract panic patterns, mapped to actionable messages.
//!
//! The vault contract communicates preconditions through panic strings, so
//! this is inherently wording-coupled. Each operation gets its own table,
//! checked in a fixed priority order (first match wins — the patterns are
//! not mutually exclusive substrings). Anything unmatched falls through to
//! the generic JSON-dump reply at the call site; an unknown panic is never
//! silently dropped.

use crate::failure::failure_text;
use crate::format::format_near_timestamp;
use regex_lite::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// The vault operations with classification tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RepayLoan,
    ProcessClaims,
    RequestLiquidity,
    AcceptLiquidity,
}

const MISSING_ONE_YOCTO: &str = "Requires attached deposit of exactly 1 yoctoNEAR";

/// Request-liquidity precondition panics, reported verbatim as the reason.
const REQUEST_PRECONDITIONS: &[&str] = &[
    "A liquidity request is already open",
    "Liquidity request already accepted",
    "Counter offers must be cleared before opening a new request",
    "Collateral must be greater than zero",
    "Requested amount must be greater than zero",
    "Duration must be greater than zero",
];

/// Map a known panic for `op` to a user-facing message, or `None` when no
/// pattern matches. Never fails; pattern evaluation order is part of the
/// observable behavior.
pub fn classify_panic(op: Operation, failure: &Value, vault_id: &str) -> Option<String> {
    let text = failure_text(failure);
    match op {
        Operation::RepayLoan => classify_repay(&text, vault_id),
        Operation::ProcessClaims => classify_process_claims(&text, vault_id),
        Operation::RequestLiquidity => classify_request_liquidity(&text, vault_id),
        Operation::AcceptLiquidity => classify_accept_liquidity(&text, vault_id),
    }
}

fn one_yocto_message() -> String {
    "❌ Requires exactly 1 yoctoNEAR attached deposit.\n\
     This tool attaches it automatically; please retry."
        .to_string()
}

fn vault_busy_message(text: &str, vault_id: &str) -> Option<String> {
    // Matches: Vault busy with "ProcessClaims" (quotes optional).
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"Vault\s+busy\s+with\s+"?([A-Za-z]+)"?"#).expect("valid vault-busy pattern")
    });
    let kind = re.captures(text)?.get(1)?.as_str();
    Some(format!(
        "⏳ Vault is busy processing another step.\n\
         - Operation: `{kind}`\n\
         - Vault: `{vault_id}`\n\
         - Tip: Wait for callbacks to finish, then try again."
    ))
}

fn classify_repay(text: &str, vault_id: &str) -> Option<String> {
    if text.contains(MISSING_ONE_YOCTO) {
        return Some(one_yocto_message());
    }
    if text.contains("Only the vault owner can repay the loan") {
        return Some(format!(
            "❌ Only the vault owner can repay the loan.\n- Vault: `{vault_id}`"
        ));
    }
    if text.contains("No active loan to repay") {
        return Some(format!("ℹ️ No active loan to repay.\n- Vault: `{vault_id}`"));
    }
    if text.contains("No accepted offer found") {
        return Some(format!(
            "ℹ️ No accepted offer exists.\n\
             - Vault: `{vault_id}`\n\
             - Repayment is only applicable when a lender's offer was accepted."
        ));
    }
    if text.contains("Loan has already entered liquidation") {
        return Some(format!(
            "⚠️ Loan is already in liquidation; repay_loan is blocked.\n\
             - Vault: `{vault_id}`\n\
             - Use process_claims to progress repayment in NEAR."
        ));
    }
    None
}

fn classify_process_claims(text: &str, vault_id: &str) -> Option<String> {
    // Not expired yet; the nanosecond deadline may appear anywhere in the text.
    if let Some(message) = liquidation_deadline_message(text, vault_id) {
        return Some(message);
    }
    if text.contains("No accepted offer found") {
        return Some(format!(
            "ℹ️ No active loan to liquidate.\n\
             - Vault: `{vault_id}`\n\
             - There is no accepted offer; liquidation is not applicable."
        ));
    }
    if let Some(message) = vault_busy_message(text, vault_id) {
        return Some(message);
    }
    if text.contains(MISSING_ONE_YOCTO) {
        return Some(one_yocto_message());
    }
    None
}

fn liquidation_deadline_message(text: &str, vault_id: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"Liquidation not allowed until (\d+)").expect("valid deadline pattern")
    });
    let raw = re.captures(text)?.get(1)?.as_str();
    let when = raw
        .parse::<i64>()
        .ok()
        .and_then(format_near_timestamp)
        .unwrap_or_else(|| raw.to_string());
    Some(format!(
        "⏳ Liquidation not allowed yet.\n\
         - Earliest at: `{when}`\n\
         - Vault: `{vault_id}`\n\
         - Tip: Run this again after the deadline."
    ))
}

fn classify_request_liquidity(text: &str, vault_id: &str) -> Option<String> {
    if text.contains(MISSING_ONE_YOCTO) {
        return Some(one_yocto_message());
    }
    if text.contains("Only the vault owner can request liquidity") {
        return Some(format!(
            "❌ Only the vault owner can request liquidity.\n- Vault: `{vault_id}`"
        ));
    }
    for precondition in REQUEST_PRECONDITIONS {
        if text.contains(precondition) {
            return Some(format!(
                "❌ Liquidity request rejected.\n\
                 - Vault: `{vault_id}`\n\
                 - Reason: {precondition}"
            ));
        }
    }
    vault_busy_message(text, vault_id)
}

fn classify_accept_liquidity(text: &str, vault_id: &str) -> Option<String> {
    if text.contains(MISSING_ONE_YOCTO) {
        return Some(one_yocto_message());
    }
    if text.contains("not registered") {
        return Some(format!(
            "❌ The receiving account is not registered with the token contract.\n\
             - Vault: `{vault_id}`\n\
             - Tip: Run `register_account_with_token` first, then retry."
        ));
    }
    let lowered = text.to_lowercase();
    if lowered.contains("insufficient")
        || (lowered.contains("not enough") && lowered.contains("balance"))
        || text.contains("Cannot decrement")
    {
        return Some(format!(
            "❌ Insufficient token balance to fund this loan.\n\
             - Vault: `{vault_id}`\n\
             - Top up the token balance, then retry."
        ));
    }
    if text.contains("MethodResolveError")
        || text.contains("MethodNotFound")
        || text.contains("CodeDoesNotExist")
        || text.contains("does not exist")
    {
        return Some(format!(
            "❌ Token contract call could not be resolved.\n\
             - Vault: `{vault_id}`\n\
             - Check the token contract address in the request; it may be misconfigured."
        ));
    }
    None
}
