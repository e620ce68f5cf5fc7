//! Token registration and NEAR transfer scenarios.

mod common;

use common::*;
use serde_json::json;
use sudostake_core::error::NearError;
use sudostake_core::{Network, Session, Tool, TransactionOutcome, ViewOutcome};
use sudostake_tools::token_registration::TokenRegistrationTool;
use sudostake_tools::transfer_near::TransferNearTool;

const VAULT: &str = "vault-1.nzaza.testnet";

#[tokio::test]
async fn registration_uses_storage_bounds_minimum() {
    let h = harness(headless());
    h.near
        .set_view_method(USDC, "storage_balance_of", ViewOutcome::new(None));
    h.near.set_view_method(
        USDC,
        "storage_balance_bounds",
        ViewOutcome::new(Some(json!({"min": "1500000000000000000000", "max": null}))),
    );
    h.near.queue_call(Ok(TransactionOutcome::success("txreg")));

    let tool = TokenRegistrationTool::new(h.ctx.clone());
    let result = tool.execute(json!({"account": VAULT})).await.unwrap();
    assert!(result.success);

    {
        let calls = h.near.calls.lock().unwrap();
        assert_eq!(calls[0].contract_id, USDC);
        assert_eq!(calls[0].method, "storage_deposit");
        assert_eq!(
            calls[0].args,
            json!({"account_id": VAULT, "registration_only": true})
        );
        assert_eq!(calls[0].deposit, 1_500_000_000_000_000_000_000);
    }

    let reply = h.env.last_reply();
    assert!(reply.starts_with("✅ **Registered Account With Token**"));
    assert!(reply.contains(&format!("- 👤 Account: `{VAULT}`")));
    assert!(reply.contains(&format!("- 🪙 Token: `{USDC}`")));
    assert!(reply.contains("transactions/txreg"));
}

#[tokio::test]
async fn registration_short_circuits_when_already_registered() {
    let h = harness(headless());
    h.near.set_view_method(
        USDC,
        "storage_balance_of",
        ViewOutcome::new(Some(json!({"total": "1250000000000000000000", "available": "0"}))),
    );

    let tool = TokenRegistrationTool::new(h.ctx.clone());
    let result = tool.execute(json!({"account": VAULT})).await.unwrap();

    assert!(result.success);
    assert_eq!(
        h.env.last_reply(),
        format!("✅ `{VAULT}` is already registered with `{USDC}`.")
    );
    assert_eq!(h.near.recorded_calls(), 0);
}

#[tokio::test]
async fn registration_falls_back_to_default_deposit_on_view_failures() {
    // Both views unscripted: the balance lookup reads as "not registered"
    // and the bounds lookup falls back to the NEP-145 default.
    let h = harness(headless());
    h.near.queue_call(Ok(TransactionOutcome::success("txreg2")));

    let tool = TokenRegistrationTool::new(h.ctx.clone());
    let result = tool.execute(json!({"account": VAULT})).await.unwrap();

    assert!(result.success);
    let calls = h.near.calls.lock().unwrap();
    assert_eq!(calls[0].deposit, 1_250_000_000_000_000_000_000);
}

#[tokio::test]
async fn registration_resolves_me_to_the_signing_account() {
    let h = harness(headless());
    h.near.set_view_method(
        USDC,
        "storage_balance_of",
        ViewOutcome::new(Some(json!({"total": "1", "available": "0"}))),
    );

    let tool = TokenRegistrationTool::new(h.ctx.clone());
    let result = tool.execute(json!({"account": "me"})).await.unwrap();

    assert!(result.success);
    assert!(h.env.last_reply().contains("`lender.testnet`"));
}

#[tokio::test]
async fn registration_panic_embeds_failure_dump() {
    let h = harness(headless());
    h.near
        .set_view_method(USDC, "storage_balance_of", ViewOutcome::new(None));
    h.near.queue_call(Ok(panic_outcome(
        "Requires attached deposit of at least 1250000000000000000000 yoctoNEAR",
        "txfail",
    )));

    let tool = TokenRegistrationTool::new(h.ctx.clone());
    let result = tool.execute(json!({"account": VAULT})).await.unwrap();

    assert!(!result.success);
    let reply = h.env.last_reply();
    assert!(reply.starts_with("❌ Failed to register account with token\n\n> "));
    assert!(reply.contains("Requires attached deposit"));
}

#[tokio::test]
async fn registration_refuses_without_signing_keys() {
    let h = harness(Session::view_only(Network::Testnet));

    let tool = TokenRegistrationTool::new(h.ctx.clone());
    let result = tool.execute(json!({"account": VAULT})).await.unwrap();

    assert!(!result.success);
    assert!(h.env.last_reply().contains("No signing keys available"));
    assert_eq!(h.near.recorded_calls(), 0);
    assert!(h.near.views.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transfer_converts_near_to_yocto_and_links_explorer() {
    let h = harness(headless());
    h.near
        .queue_transfer(Ok(TransactionOutcome::success("txfer")));

    let tool = TransferNearTool::new(h.ctx.clone());
    let result = tool
        .execute(json!({"vault_id": VAULT, "amount": "0.5"}))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(
        h.near.transfers.lock().unwrap().clone(),
        vec![(VAULT.to_string(), 500_000_000_000_000_000_000_000)]
    );
    let reply = h.env.last_reply();
    assert!(reply.starts_with("💸 **Transfer Submitted**"));
    assert!(reply.contains(&format!("Sent **0.50000 NEAR** to `{VAULT}`")));
    assert!(reply.contains(&format!("{TESTNET_EXPLORER}/transactions/txfer")));
}

#[tokio::test]
async fn transfer_refuses_when_balance_cannot_cover_amount() {
    let h = harness(headless());
    h.near.set_balance(100_000_000_000_000_000_000_000); // 0.1 NEAR

    let tool = TransferNearTool::new(h.ctx.clone());
    let result = tool
        .execute(json!({"vault_id": VAULT, "amount": "0.5"}))
        .await
        .unwrap();

    assert!(!result.success);
    let reply = h.env.last_reply();
    assert!(reply.starts_with("❌ Insufficient NEAR balance."));
    assert!(reply.contains("Available: **0.10000 NEAR**"));
    assert!(reply.contains("Requested: **0.50000 NEAR**"));
    assert!(h.near.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transfer_rejects_unparseable_and_zero_amounts() {
    let h = harness(headless());
    let tool = TransferNearTool::new(h.ctx.clone());

    let result = tool
        .execute(json!({"vault_id": VAULT, "amount": "ten"}))
        .await
        .unwrap();
    assert!(!result.success);
    assert!(h.env.last_reply().starts_with("❌ Invalid amount: `ten`"));

    let result = tool
        .execute(json!({"vault_id": VAULT, "amount": "0"}))
        .await
        .unwrap();
    assert!(!result.success);
    assert!(h
        .env
        .last_reply()
        .starts_with("❌ Amount must be greater than 0."));

    assert!(h.near.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transfer_rejects_empty_vault_account() {
    let h = harness(headless());
    let tool = TransferNearTool::new(h.ctx.clone());

    let result = tool
        .execute(json!({"vault_id": "  ", "amount": "1"}))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(h.env.last_reply(), "❌ Invalid vault account: value is empty.");
    assert!(h.near.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transfer_failure_carries_connectivity_hint() {
    let h = harness(Session::headless("lender.near", Network::Mainnet));
    h.near.queue_transfer(Err(NearError::Transport(
        "getaddrinfo ENOTFOUND rpc.mainnet.near.org".into(),
    )));

    let tool = TransferNearTool::new(h.ctx.clone());
    let result = tool
        .execute(json!({"vault_id": VAULT, "amount": "2"}))
        .await
        .unwrap();

    assert!(!result.success);
    let reply = h.env.last_reply();
    assert!(reply.starts_with(&format!("❌ Transfer failed for `{VAULT}` (2 NEAR)")));
    assert!(reply.contains("📡 RPC appears unreachable."));
    assert!(reply.contains("Configured network: `mainnet` (vault looks like `testnet`)"));
    assert!(reply.contains("set `NEAR_NETWORK=testnet`"));
}

#[tokio::test]
async fn transfer_refuses_without_signing_keys() {
    let h = harness(Session::view_only(Network::Testnet));

    let tool = TransferNearTool::new(h.ctx.clone());
    let result = tool
        .execute(json!({"vault_id": VAULT, "amount": "1"}))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(h.env.last_reply().contains("No signing keys available"));
    assert!(h.near.transfers.lock().unwrap().is_empty());
}
