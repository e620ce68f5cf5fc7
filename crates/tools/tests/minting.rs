//! Mint-vault scenarios.

mod common;

use common::*;
use serde_json::json;
use sudostake_core::error::NearError;
use sudostake_core::{Network, Session, Tool, TransactionOutcome};
use sudostake_tools::mint_vault::MintVaultTool;

#[tokio::test]
async fn mint_pays_the_fee_and_reports_the_new_vault() {
    let h = harness(headless());
    let outcome = TransactionOutcome::success("txmint").with_logs(vec![event_log(
        "vault_minted",
        json!({"vault": "vault-12.nzaza.testnet"}),
    )]);
    h.near.queue_call(Ok(outcome));

    let tool = MintVaultTool::new(h.ctx.clone());
    let result = tool.execute(json!({})).await.unwrap();
    assert!(result.success);

    {
        let calls = h.near.calls.lock().unwrap();
        assert_eq!(calls[0].contract_id, FACTORY);
        assert_eq!(calls[0].method, "mint_vault");
        // 10 NEAR fee attached
        assert_eq!(calls[0].deposit, 10_000_000_000_000_000_000_000_000);
    }

    let reply = h.env.last_reply();
    assert!(reply.starts_with("🏗️ **Vault Minted**"));
    assert!(reply.contains("🔑 Vault account: [`vault-12.nzaza.testnet`]"));
    assert!(reply.contains("🔹 Tx: [txmint]"));
    assert_eq!(
        h.index.indexed.lock().unwrap().clone(),
        vec![("vault-12.nzaza.testnet".to_string(), "txmint".to_string())]
    );
}

#[tokio::test]
async fn missing_vault_minted_event_is_reported() {
    let h = harness(headless());
    h.near.queue_call(Ok(TransactionOutcome::success("txmint")));

    let tool = MintVaultTool::new(h.ctx.clone());
    let result = tool.execute(json!({})).await.unwrap();

    assert!(!result.success);
    assert_eq!(
        h.env.last_reply(),
        "❌ Vault minting failed\n\n**Error:** vault_minted log not found in transaction logs"
    );
}

#[tokio::test]
async fn insufficient_balance_error_shows_the_shortfall() {
    let h = harness(headless());
    let body = json!({
        "signer_id": "lender.testnet",
        "balance": "9000000000000000000000000",
        "cost": "10500000000000000000000000"
    });
    h.near.queue_call(Err(NearError::Rpc(body.to_string())));

    let tool = MintVaultTool::new(h.ctx.clone());
    let result = tool.execute(json!({})).await.unwrap();

    assert!(!result.success);
    let reply = h.env.last_reply();
    assert!(reply.starts_with("❌ Insufficient NEAR to mint vault."));
    assert!(reply.contains("- 👤 Account: `lender.testnet`"));
    assert!(reply.contains("- Available: **9.00000 NEAR**"));
    assert!(reply.contains("- Required: **10.50000 NEAR**"));
    assert!(reply.contains("- Shortfall: **1.50000 NEAR**"));
    assert!(reply.contains("The minting fee is 10 NEAR plus gas."));
}

#[tokio::test]
async fn view_only_session_cannot_mint() {
    let h = harness(Session::view_only(Network::Testnet));

    let tool = MintVaultTool::new(h.ctx.clone());
    let result = tool.execute(json!({})).await.unwrap();

    assert!(!result.success);
    assert!(h.env.last_reply().starts_with("⚠️ No signing keys available."));
    assert_eq!(h.near.recorded_calls(), 0);
}
