//! Transaction-result interpretation for SudoStake vault operations.
//!
//! The vault contract reports what happened through three partially
//! structured channels: an execution status (success value or a nested
//! failure envelope), freeform panic strings inside that envelope, and
//! `EVENT_JSON:` log lines. This crate turns all three into deterministic
//! user-facing replies:
//!
//! - [`event`] — tolerant parsing of `EVENT_JSON:` log lines
//! - [`failure`] — status → single failure-text extraction
//! - [`classify`] — known panic patterns → actionable messages, per operation
//! - [`liquidation`] — log set → liquidation lifecycle snapshot
//! - [`compose`] — reply templates (stable ordering, raw + human amounts)
//! - [`connectivity`] — RPC/DNS unreachability hints
//! - [`format`] — nanosecond timestamps and yoctoNEAR conversions
//!
//! Everything here is a total, synchronous function over already-fetched
//! data; nothing raises past its boundary and nothing blocks. It is safe to
//! run concurrently for independent transactions.

pub mod classify;
pub mod compose;
pub mod connectivity;
pub mod event;
pub mod failure;
pub mod format;
pub mod liquidation;

pub use classify::{classify_panic, Operation};
pub use compose::{
    compose_claims_reply, contract_panic_reply, header_lines, repay_success_reply,
    unexpected_error_reply,
};
pub use connectivity::{is_connectivity_error, rpc_connectivity_hint};
pub use event::{find_event_data, log_contains_event, parse_event, EventRecord};
pub use failure::{extract_failure, failure_text};
pub use format::{format_near_timestamp, near_approx, yocto_with_approx};
pub use liquidation::LiquidationView;
