//! Process-claims scenarios: eligibility panics, lifecycle replies.

mod common;

use common::*;
use serde_json::json;
use sudostake_core::{Tool, TransactionOutcome};
use sudostake_tools::process_claims::ProcessClaimsTool;

const VAULT: &str = "vault-3.nzaza.testnet";

#[tokio::test]
async fn not_yet_eligible_panic_shows_the_deadline_in_utc() {
    let h = harness(headless());
    h.near.queue_call(Ok(panic_outcome(
        "panicked: Liquidation not allowed until 1700000000000000000",
        "tx1",
    )));

    let tool = ProcessClaimsTool::new(h.ctx.clone());
    let result = tool.execute(json!({"vault_id": VAULT})).await.unwrap();

    assert!(!result.success);
    assert_eq!(
        h.env.last_reply(),
        format!(
            "⏳ Liquidation not allowed yet.\n\
             - Earliest at: `2023-11-14 22:13 UTC`\n\
             - Vault: `{VAULT}`\n\
             - Tip: Run this again after the deadline."
        )
    );
}

#[tokio::test]
async fn vault_busy_panic_strips_the_quotes() {
    let h = harness(headless());
    h.near.queue_call(Ok(panic_outcome(
        "panicked: Vault busy with \"RepayLoan\"",
        "tx1",
    )));

    let tool = ProcessClaimsTool::new(h.ctx.clone());
    tool.execute(json!({"vault_id": VAULT})).await.unwrap();

    let reply = h.env.last_reply();
    assert!(reply.contains("- Operation: `RepayLoan`"));
    assert!(!reply.contains('"'));
}

#[tokio::test]
async fn completed_liquidation_reports_total_repaid() {
    let h = harness(headless());
    let outcome = TransactionOutcome::success("tx55").with_logs(vec![event_log(
        "liquidation_complete",
        json!({"total_repaid": "2000000000000000000000000"}),
    )]);
    h.near.queue_call(Ok(outcome));

    let tool = ProcessClaimsTool::new(h.ctx.clone());
    let result = tool.execute(json!({"vault_id": VAULT})).await.unwrap();

    assert!(result.success);
    let reply = h.env.last_reply();
    assert!(reply.starts_with("✅ **Liquidation Complete** — lender fully repaid."));
    assert!(reply.contains(
        "- 💰 Total repaid: `2000000000000000000000000` yoctoNEAR (~2.000000 NEAR)"
    ));
    assert!(reply.contains("transactions/tx55"));
    assert_eq!(
        h.index.indexed.lock().unwrap().clone(),
        vec![(VAULT.to_string(), "tx55".to_string())]
    );
}

#[tokio::test]
async fn progress_suppresses_completion_in_the_same_batch() {
    let h = harness(headless());
    let outcome = TransactionOutcome::success("tx56").with_logs(vec![
        event_log(
            "liquidation_started",
            json!({"lender": "lender.testnet", "at": "1700000000000000000"}),
        ),
        event_log("liquidation_complete", json!({"total_repaid": "1"})),
    ]);
    h.near.queue_call(Ok(outcome));

    let tool = ProcessClaimsTool::new(h.ctx.clone());
    tool.execute(json!({"vault_id": VAULT})).await.unwrap();

    let reply = h.env.last_reply();
    assert!(reply.starts_with("🔄 **Claims Processing In Progress**"));
    assert!(reply.contains("• Liquidation started. Lender: `lender.testnet`."));
    assert!(!reply.contains("Liquidation Complete"));
}

#[tokio::test]
async fn bare_tag_logs_count_as_events() {
    let h = harness(headless());
    let outcome =
        TransactionOutcome::success("tx57").with_logs(vec!["unstake_recorded".to_string()]);
    h.near.queue_call(Ok(outcome));

    let tool = ProcessClaimsTool::new(h.ctx.clone());
    tool.execute(json!({"vault_id": VAULT})).await.unwrap();

    let reply = h.env.last_reply();
    assert!(reply.starts_with("🔄 **Claims Processing In Progress**"));
    assert!(reply.contains("• Unstake recorded — wait ~4 epochs for NEAR to mature."));
}

#[tokio::test]
async fn no_lifecycle_events_fall_back_to_step_reply() {
    let h = harness(headless());
    h.near.queue_call(Ok(TransactionOutcome::success("tx58")));

    let tool = ProcessClaimsTool::new(h.ctx.clone());
    let result = tool.execute(json!({"vault_id": VAULT})).await.unwrap();

    assert!(result.success);
    let reply = h.env.last_reply();
    assert!(reply.starts_with("✅ Processed claims step."));
    assert!(reply.ends_with("- If not fully repaid, run again as more NEAR matures."));
}
