//! Error types for the SudoStake agent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all agent operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- NEAR RPC errors ---
    #[error("NEAR error: {0}")]
    Near(#[from] NearError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Indexer errors ---
    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from the NEAR RPC client adapter.
///
/// `Transport` carries the raw transport text so the connectivity hint
/// classifier can match DNS/connection indicator substrings against it.
#[derive(Debug, Clone, Error)]
pub enum NearError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("{0}")]
    Transport(String),

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("no signing keys available for account {0:?}")]
    SigningUnavailable(Option<String>),

    #[error("view call to {contract_id}.{method} returned no result")]
    EmptyViewResult { contract_id: String, method: String },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("index API request failed: {0}")]
    Request(String),

    #[error("index API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("index API returned a non-JSON response: {0}")]
    InvalidBody(String),
}
