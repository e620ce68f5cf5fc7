//! Deterministic reply templates.
//!
//! Every reply includes the vault account id and, when available, the
//! transaction hash with an explorer link. yoctoNEAR-denominated amounts are
//! always shown raw, with a best-effort human approximation appended.

use crate::format::yocto_with_approx;
use crate::liquidation::LiquidationView;
use serde_json::Value;

/// The vault/transaction header shared by state-changing tool replies.
pub fn header_lines(explorer_url: &str, vault_id: &str, tx_hash: &str) -> String {
    format!(
        "- 🏦 Vault: [`{vault_id}`]({explorer_url}/accounts/{vault_id})\n\
         - 🔗 Tx: [{tx_hash}]({explorer_url}/transactions/{tx_hash})"
    )
}

/// The success reply for `repay_loan`.
pub fn repay_success_reply(explorer_url: &str, vault_id: &str, tx_hash: &str) -> String {
    format!(
        "✅ **Loan Repaid Successfully**\n{}",
        header_lines(explorer_url, vault_id, tx_hash)
    )
}

/// Generic contract-panic reply embedding the raw failure detail as
/// pretty-printed JSON for operator debuggability.
pub fn contract_panic_reply(first_line: &str, failure: &Value) -> String {
    let dump = serde_json::to_string_pretty(failure).unwrap_or_else(|_| failure.to_string());
    format!("{first_line}\n\n> {dump}")
}

/// Generic unexpected-error reply, optionally annotated with a
/// connectivity hint.
pub fn unexpected_error_reply(context: &str, error: &str, hint: Option<&str>) -> String {
    let mut reply = format!("❌ Unexpected error during {context}\n\n**Error:** {error}");
    if let Some(hint) = hint {
        reply.push_str("\n\n");
        reply.push_str(hint);
    }
    reply
}

/// Compose the reply for one successful `process_claims` step.
///
/// Progress lines take precedence: when any progress-type flag is set, the
/// "in progress" message is rendered and the completion message is not,
/// even if the same log set also signals completion. With no signals at
/// all, a generic "processed one step" fallback tells the caller to re-run
/// as more stake matures.
pub fn compose_claims_reply(
    explorer_url: &str,
    vault_id: &str,
    tx_hash: &str,
    view: &LiquidationView,
) -> String {
    let header = header_lines(explorer_url, vault_id, tx_hash);

    if view.in_progress() {
        return format!(
            "🔄 **Claims Processing In Progress**\n{header}\n{}",
            progress_lines(view).join("\n")
        );
    }

    if view.completed {
        let extra = match &view.total_repaid {
            Some(raw) => format!("\n- 💰 Total repaid: {}", yocto_with_approx(raw)),
            None => String::new(),
        };
        return format!("✅ **Liquidation Complete** — lender fully repaid.{extra}\n{header}");
    }

    format!(
        "✅ Processed claims step.\n{header}\n\
         - If not fully repaid, run again as more NEAR matures."
    )
}

/// The ordered progress bullet list for an in-progress liquidation.
fn progress_lines(view: &LiquidationView) -> Vec<String> {
    let mut lines = Vec::new();

    if view.started {
        let mut line = "• Liquidation started.".to_string();
        if let Some(lender) = &view.lender {
            line.push_str(&format!(" Lender: `{lender}`."));
        }
        if let Some(at) = &view.started_at {
            line.push_str(&format!(" At: `{at}`."));
        }
        lines.push(line);
    }

    if view.unstake_recorded {
        lines.push("• Unstake recorded — wait ~4 epochs for NEAR to mature.".to_string());
    }

    if view.waiting {
        lines.push("• Waiting for available/matured NEAR; re-run to continue.".to_string());
        if let Some(reason) = &view.waiting_reason {
            lines.push(format!("• Reason: {reason}."));
        }
    }

    if view.unstake_failed {
        let mut line = "• Warning: an unstake attempt failed on a validator.".to_string();
        if let Some(validator) = &view.failed.validator {
            line.push_str(&format!(" Validator: `{validator}`."));
        }
        if let Some(amount) = &view.failed.amount {
            line.push_str(&format!(" Amount: {}.", yocto_with_approx(amount)));
        }
        lines.push(line);
    }

    // Granular unstake detail after the summary bullets.
    if view.unstake_recorded {
        let detail = &view.unstake;
        if detail.validator.is_some() || detail.amount.is_some() || detail.epoch_height.is_some() {
            let mut line = "• Unstake recorded".to_string();
            if let Some(validator) = &detail.validator {
                line.push_str(&format!(" on `{validator}`"));
            }
            if let Some(amount) = &detail.amount {
                line.push_str(&format!(" amount {}", yocto_with_approx(amount)));
            }
            if let Some(epoch) = detail.epoch_height {
                line.push_str(&format!(" at epoch `{epoch}`"));
            }
            line.push('.');
            lines.push(line);
        }
    }

    lines
}
