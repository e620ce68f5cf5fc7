//! Shared doubles for the tool scenario tests.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use sudostake_config::NetworkProfile;
use sudostake_core::error::{Error, IndexerError, NearError};
use sudostake_core::{
    ChatMessage, DocChunk, Environment, ExecutionStatus, LenderPosition, NearClient, Network,
    PendingRequest, Session, TransactionOutcome, VaultIndex, ViewOutcome,
};
use sudostake_tools::ToolCtx;

pub const TESTNET_EXPLORER: &str = "https://explorer.testnet.near.org";
pub const FACTORY: &str = "nzaza.testnet";
pub const USDC: &str = "usdc.tkn.primitives.testnet";

#[derive(Default)]
pub struct MockEnv {
    pub messages: Mutex<Vec<ChatMessage>>,
    pub replies: Mutex<Vec<String>>,
    pub chunks: Mutex<Vec<DocChunk>>,
}

impl MockEnv {
    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub fn last_reply(&self) -> String {
        self.replies().last().cloned().expect("no reply delivered")
    }
}

#[async_trait]
impl Environment for MockEnv {
    fn list_messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn add_reply(&self, text: &str) {
        self.replies.lock().unwrap().push(text.to_string());
    }

    async fn query_vector_store(
        &self,
        _store_id: &str,
        _query: &str,
    ) -> Result<Vec<DocChunk>, Error> {
        Ok(self.chunks.lock().unwrap().clone())
    }
}

pub struct RecordedCall {
    pub contract_id: String,
    pub method: String,
    pub args: Value,
    pub gas: u64,
    pub deposit: u128,
}

/// Scripted NEAR client: queued call results, view results keyed by
/// contract, everything recorded.
#[derive(Default)]
pub struct MockNear {
    call_results: Mutex<Vec<Result<TransactionOutcome, NearError>>>,
    transfer_results: Mutex<Vec<Result<TransactionOutcome, NearError>>>,
    view_results: Mutex<HashMap<String, ViewOutcome>>,
    method_view_results: Mutex<HashMap<(String, String), ViewOutcome>>,
    balance: Mutex<Option<u128>>,
    pub calls: Mutex<Vec<RecordedCall>>,
    pub transfers: Mutex<Vec<(String, u128)>>,
    pub views: Mutex<Vec<(String, String)>>,
}

impl MockNear {
    pub fn queue_call(&self, result: Result<TransactionOutcome, NearError>) {
        self.call_results.lock().unwrap().push(result);
    }

    pub fn queue_transfer(&self, result: Result<TransactionOutcome, NearError>) {
        self.transfer_results.lock().unwrap().push(result);
    }

    pub fn set_view(&self, contract_id: &str, outcome: ViewOutcome) {
        self.view_results
            .lock()
            .unwrap()
            .insert(contract_id.to_string(), outcome);
    }

    /// Script one view method specifically; takes precedence over
    /// [`set_view`](Self::set_view) for that contract.
    pub fn set_view_method(&self, contract_id: &str, method: &str, outcome: ViewOutcome) {
        self.method_view_results
            .lock()
            .unwrap()
            .insert((contract_id.to_string(), method.to_string()), outcome);
    }

    pub fn set_balance(&self, yocto: u128) {
        *self.balance.lock().unwrap() = Some(yocto);
    }

    pub fn recorded_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl NearClient for MockNear {
    async fn call(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
        gas: u64,
        deposit: u128,
    ) -> Result<TransactionOutcome, NearError> {
        self.calls.lock().unwrap().push(RecordedCall {
            contract_id: contract_id.to_string(),
            method: method_name.to_string(),
            args,
            gas,
            deposit,
        });
        let mut queued = self.call_results.lock().unwrap();
        if queued.is_empty() {
            return Err(NearError::Rpc("unscripted call".into()));
        }
        queued.remove(0)
    }

    async fn view(
        &self,
        contract_id: &str,
        method_name: &str,
        _args: Value,
    ) -> Result<ViewOutcome, NearError> {
        self.views
            .lock()
            .unwrap()
            .push((contract_id.to_string(), method_name.to_string()));
        if let Some(outcome) = self
            .method_view_results
            .lock()
            .unwrap()
            .get(&(contract_id.to_string(), method_name.to_string()))
        {
            return Ok(outcome.clone());
        }
        self.view_results
            .lock()
            .unwrap()
            .get(contract_id)
            .cloned()
            .ok_or_else(|| NearError::Rpc("unscripted view".into()))
    }

    async fn send_money(
        &self,
        receiver_id: &str,
        amount: u128,
    ) -> Result<TransactionOutcome, NearError> {
        self.transfers
            .lock()
            .unwrap()
            .push((receiver_id.to_string(), amount));
        let mut queued = self.transfer_results.lock().unwrap();
        if queued.is_empty() {
            return Err(NearError::Rpc("unscripted transfer".into()));
        }
        queued.remove(0)
    }

    async fn get_balance(&self) -> Result<u128, NearError> {
        (*self.balance.lock().unwrap())
            .ok_or_else(|| NearError::Rpc("unscripted balance".into()))
    }
}

#[derive(Default)]
pub struct MockIndex {
    pub indexed: Mutex<Vec<(String, String)>>,
    pub fail_indexing: bool,
    pub fail_listing: bool,
    pub pending: Mutex<Vec<PendingRequest>>,
    pub positions: Mutex<Vec<LenderPosition>>,
}

#[async_trait]
impl VaultIndex for MockIndex {
    async fn index_vault(&self, vault_id: &str, tx_hash: &str) -> Result<(), IndexerError> {
        if self.fail_indexing {
            return Err(IndexerError::Status {
                status: 500,
                body: "index backend down".into(),
            });
        }
        self.indexed
            .lock()
            .unwrap()
            .push((vault_id.to_string(), tx_hash.to_string()));
        Ok(())
    }

    async fn pending_requests(
        &self,
        _factory_id: &str,
    ) -> Result<Vec<PendingRequest>, IndexerError> {
        if self.fail_listing {
            return Err(IndexerError::Request("connection refused".into()));
        }
        Ok(self.pending.lock().unwrap().clone())
    }

    async fn lender_positions(
        &self,
        _factory_id: &str,
        _lender_id: &str,
    ) -> Result<Vec<LenderPosition>, IndexerError> {
        if self.fail_listing {
            return Err(IndexerError::Request("connection refused".into()));
        }
        Ok(self.positions.lock().unwrap().clone())
    }
}

pub struct Harness {
    pub env: Arc<MockEnv>,
    pub near: Arc<MockNear>,
    pub index: Arc<MockIndex>,
    pub ctx: Arc<ToolCtx>,
}

pub fn testnet_profile() -> NetworkProfile {
    NetworkProfile {
        network: Network::Testnet,
        rpc_url: "https://rpc.testnet.near.org".into(),
        explorer_url: TESTNET_EXPLORER.into(),
        factory_id: FACTORY.into(),
        usdc_contract: USDC.into(),
        index_api_base: "https://example.test/api".into(),
    }
}

pub fn harness(session: Session) -> Harness {
    harness_with(session, MockIndex::default())
}

pub fn harness_with(session: Session, index: MockIndex) -> Harness {
    let env = Arc::new(MockEnv::default());
    let near = Arc::new(MockNear::default());
    let index = Arc::new(index);
    let ctx = Arc::new(
        ToolCtx::new(
            env.clone(),
            near.clone(),
            index.clone(),
            session,
            testnet_profile(),
        )
        .with_vector_store("vs_test"),
    );
    Harness {
        env,
        near,
        index,
        ctx,
    }
}

pub fn headless() -> Session {
    Session::headless("lender.testnet", Network::Testnet)
}

/// A failed outcome whose panic text is `message`.
pub fn panic_outcome(message: &str, tx_hash: &str) -> TransactionOutcome {
    TransactionOutcome {
        status: ExecutionStatus::Failure(json!({
            "ActionError": {
                "kind": {"FunctionCallError": {"ExecutionError": message}}
            }
        })),
        logs: vec![],
        transaction_hash: tx_hash.to_string(),
    }
}

pub fn event_log(event: &str, data: Value) -> String {
    format!("EVENT_JSON:{}", json!({"event": event, "data": data}))
}
