//! Failure extraction from transaction execution status.

use serde_json::Value;
use sudostake_core::ExecutionStatus;

/// Pull the failure detail out of a transaction status.
///
/// Returns the nested `ActionError.kind` structure when present; for any
/// other failure shape, the whole failure envelope, so the caller can still
/// show a diagnostic dump. `None` means success.
pub fn extract_failure(status: &ExecutionStatus) -> Option<Value> {
    let ExecutionStatus::Failure(failure) = status else {
        return None;
    };
    Some(
        failure
            .get("ActionError")
            .and_then(|action| action.get("kind"))
            .cloned()
            .unwrap_or_else(|| failure.clone()),
    )
}

/// Extract the most relevant error text from a failure detail.
///
/// Prefers the inner `FunctionCallError.ExecutionError` string — the
/// substring-matchable panic message the contract emits — and falls back to
/// a JSON dump of the whole detail for visibility. Never fails.
pub fn failure_text(failure: &Value) -> String {
    if let Some(text) = failure
        .get("FunctionCallError")
        .and_then(|fce| fce.get("ExecutionError"))
        .and_then(Value::as_str)
    {
        return text.to_string();
    }
    failure.to_string()
}
