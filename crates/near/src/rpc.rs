//! JSON-RPC transport for views, balances, and signed submissions.

use crate::signer::{FunctionCallRequest, TransactionSigner};
use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use sudostake_core::{NearClient, NearError, TransactionOutcome, ViewOutcome};
use tracing::debug;

const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`NearClient`] over plain NEAR JSON-RPC.
pub struct JsonRpcClient {
    http: reqwest::Client,
    rpc_url: String,
    signer: Option<Arc<dyn TransactionSigner>>,
}

impl JsonRpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        JsonRpcClient {
            http: reqwest::Client::builder()
                .timeout(RPC_TIMEOUT)
                .build()
                .unwrap_or_default(),
            rpc_url: rpc_url.into(),
            signer: None,
        }
    }

    /// Attach a signing backend, enabling state-changing calls.
    pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    fn signer(&self) -> Result<&Arc<dyn TransactionSigner>, NearError> {
        self.signer
            .as_ref()
            .ok_or(NearError::SigningUnavailable(None))
    }

    async fn query(&self, params: Value) -> Result<Value, NearError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "sudostake-agent",
            "method": "query",
            "params": params,
        });
        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NearError::Transport(e.to_string()))?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| NearError::InvalidResponse(e.to_string()))?;

        if let Some(error) = payload.get("error") {
            return Err(NearError::Rpc(error.to_string()));
        }
        if !status.is_success() {
            return Err(NearError::Rpc(format!("HTTP {status}")));
        }
        payload
            .get("result")
            .cloned()
            .ok_or_else(|| NearError::InvalidResponse("missing result field".into()))
    }
}

/// Base64-encode view-call arguments the way the RPC expects them.
fn encode_args(args: &Value) -> String {
    base64::engine::general_purpose::STANDARD.encode(args.to_string())
}

/// Decode a `call_function` result: a byte array holding JSON.
fn decode_call_result(result: &Value) -> Result<ViewOutcome, NearError> {
    let bytes = result
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| NearError::InvalidResponse("call_function result is not a byte array".into()))?
        .iter()
        .map(|v| {
            v.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| NearError::InvalidResponse("non-byte in result array".into()))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if bytes.is_empty() {
        return Ok(ViewOutcome::new(None));
    }
    let value = serde_json::from_slice(&bytes)
        .map_err(|e| NearError::InvalidResponse(format!("view result is not JSON: {e}")))?;
    Ok(ViewOutcome::new(Some(value)))
}

/// Decode a `view_account` result into a yoctoNEAR balance.
fn decode_account_balance(result: &Value) -> Result<u128, NearError> {
    result
        .get("amount")
        .and_then(Value::as_str)
        .and_then(|amount| amount.parse().ok())
        .ok_or_else(|| NearError::InvalidResponse("view_account amount missing or invalid".into()))
}

#[async_trait]
impl NearClient for JsonRpcClient {
    async fn call(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
        gas: u64,
        deposit: u128,
    ) -> Result<TransactionOutcome, NearError> {
        let signer = self.signer()?;
        debug!(contract_id, method_name, gas, "Submitting function call");
        signer
            .sign_and_submit(FunctionCallRequest {
                contract_id: contract_id.to_string(),
                method_name: method_name.to_string(),
                args,
                gas,
                deposit,
            })
            .await
    }

    async fn view(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
    ) -> Result<ViewOutcome, NearError> {
        let result = self
            .query(json!({
                "request_type": "call_function",
                "finality": "final",
                "account_id": contract_id,
                "method_name": method_name,
                "args_base64": encode_args(&args),
            }))
            .await?;
        decode_call_result(&result)
    }

    async fn send_money(
        &self,
        receiver_id: &str,
        amount: u128,
    ) -> Result<TransactionOutcome, NearError> {
        self.signer()?.transfer(receiver_id, amount).await
    }

    async fn get_balance(&self) -> Result<u128, NearError> {
        let account_id = self.signer()?.account_id().to_string();
        let result = self
            .query(json!({
                "request_type": "view_account",
                "finality": "final",
                "account_id": account_id,
            }))
            .await?;
        decode_account_balance(&result)
    }
}
