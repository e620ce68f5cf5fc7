//! The transaction-signing backend contract.

use async_trait::async_trait;
use serde_json::Value;
use sudostake_core::{NearError, TransactionOutcome};

/// One state-changing function call, ready for signing.
#[derive(Debug, Clone)]
pub struct FunctionCallRequest {
    pub contract_id: String,
    pub method_name: String,
    pub args: Value,
    pub gas: u64,
    /// Attached deposit in yoctoNEAR.
    pub deposit: u128,
}

/// Signs and submits transactions for one account.
///
/// Implemented by the deployment's key backend; tests use doubles.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// The signer account id.
    fn account_id(&self) -> &str;

    /// Sign `request` as a function-call action and submit it, waiting for
    /// the final execution outcome.
    async fn sign_and_submit(
        &self,
        request: FunctionCallRequest,
    ) -> Result<TransactionOutcome, NearError>;

    /// Transfer `amount` yoctoNEAR to `receiver_id`.
    async fn transfer(
        &self,
        receiver_id: &str,
        amount: u128,
    ) -> Result<TransactionOutcome, NearError>;
}
