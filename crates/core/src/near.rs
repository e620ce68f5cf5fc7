//! The NEAR RPC capability consumed by the tools.
//!
//! A narrow protocol over whatever concrete client is in use (the JSON-RPC
//! adapter in `sudostake-near`, or a double in tests). Tools never depend on
//! a concrete RPC library.

use crate::error::NearError;
use crate::outcome::{TransactionOutcome, ViewOutcome};
use async_trait::async_trait;
use serde_json::Value;

/// Fixed gas budget for state-changing vault calls; generous enough to
/// drive the contract's cross-call callbacks.
pub const GAS_300_TGAS: u64 = 300_000_000_000_000;

/// The 1 yoctoNEAR deposit required by access-control-gated methods.
pub const YOCTO_1: u128 = 1;

/// NEAR block timestamps are nanoseconds since the Unix epoch.
pub const NANOSECONDS_PER_SECOND: i64 = 1_000_000_000;

/// Minimal protocol for the NEAR client used by tools.
#[async_trait]
pub trait NearClient: Send + Sync {
    /// Submit a state-changing function call and wait for its outcome.
    async fn call(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
        gas: u64,
        deposit: u128,
    ) -> Result<TransactionOutcome, NearError>;

    /// Read-only view call.
    async fn view(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
    ) -> Result<ViewOutcome, NearError>;

    /// Transfer `amount` yoctoNEAR from the signer to `receiver_id`.
    async fn send_money(
        &self,
        receiver_id: &str,
        amount: u128,
    ) -> Result<TransactionOutcome, NearError>;

    /// Signer account balance in yoctoNEAR.
    async fn get_balance(&self) -> Result<u128, NearError>;
}
