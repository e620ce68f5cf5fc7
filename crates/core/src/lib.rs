//! # SudoStake Core
//!
//! Domain types, capability traits, and error definitions for the SudoStake
//! NEAR agent. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here:
//! - [`NearClient`] — the NEAR RPC surface the tools consume
//! - [`Environment`] — the agent-hosting runtime (messages, replies, docs)
//! - [`VaultIndex`] — the best-effort indexing/listing side channel
//!
//! Implementations live in their respective crates; tests use doubles.
//! All crates depend inward on core.

pub mod environment;
pub mod error;
pub mod index;
pub mod near;
pub mod network;
pub mod outcome;
pub mod session;
pub mod tool;
pub mod vault;

// Re-export key types at crate root for ergonomics
pub use environment::{ChatMessage, DocChunk, Environment, Role};
pub use error::{Error, IndexerError, NearError, Result, ToolError};
pub use index::{LenderPosition, PendingRequest, VaultIndex};
pub use near::{NearClient, GAS_300_TGAS, NANOSECONDS_PER_SECOND, YOCTO_1};
pub use network::Network;
pub use outcome::{ExecutionStatus, TransactionOutcome, ViewOutcome};
pub use session::{Session, SigningMode};
pub use tool::{Tool, ToolCall, ToolDefinition, ToolRegistry, ToolResult};
pub use vault::{AcceptedOffer, LiquidationState, LiquidityRequestTerms, VaultState};
