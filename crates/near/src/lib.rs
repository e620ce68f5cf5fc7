//! NEAR JSON-RPC adapter implementing the [`NearClient`] capability.
//!
//! View calls and balance queries go straight to the JSON-RPC endpoint.
//! State-changing calls are delegated to an injected [`TransactionSigner`]
//! backend — building and signing NEAR transactions needs key material and
//! a borsh/ed25519 stack that deployments wire in; without one the client
//! degrades to a typed [`NearError::SigningUnavailable`] instead of
//! half-working.

mod rpc;
mod signer;

pub use rpc::JsonRpcClient;
pub use signer::{FunctionCallRequest, TransactionSigner};
