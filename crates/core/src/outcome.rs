//! Transaction and view outcomes as returned by the NEAR RPC.
//!
//! These mirror the wire shapes exactly: the externally-tagged
//! [`ExecutionStatus`] serializes to `{"SuccessValue": "..."}` /
//! `{"Failure": {...}}`, and the failure payload is kept as raw JSON so the
//! outcome interpretation layer can degrade gracefully on shapes it does
//! not specifically recognize.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Final execution status of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Base64-encoded return value (often empty).
    SuccessValue(String),
    /// Structured failure envelope, e.g.
    /// `{"ActionError": {"kind": {"FunctionCallError": {"ExecutionError": "..."}}}}`.
    Failure(Value),
}

impl ExecutionStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionStatus::Failure(_))
    }
}

/// Result of a state-changing RPC call.
///
/// `logs` keep their emission order — later lines may override earlier
/// progress signals, so order is semantically significant to the
/// liquidation aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub status: ExecutionStatus,
    pub logs: Vec<String>,
    pub transaction_hash: String,
}

impl TransactionOutcome {
    /// A successful outcome with no logs; handy in tests and doubles.
    pub fn success(transaction_hash: impl Into<String>) -> Self {
        TransactionOutcome {
            status: ExecutionStatus::SuccessValue(String::new()),
            logs: vec![],
            transaction_hash: transaction_hash.into(),
        }
    }

    pub fn with_logs(mut self, logs: Vec<String>) -> Self {
        self.logs = logs;
        self
    }
}

/// Result of a read-only view call: the decoded JSON value, when any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOutcome {
    pub result: Option<Value>,
}

impl ViewOutcome {
    pub fn new(result: Option<Value>) -> Self {
        ViewOutcome { result }
    }
}
