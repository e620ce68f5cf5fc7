//! The tool catalog: every vault operation the agent can perform.
//!
//! Each tool follows the same contract: parse arguments, run the operation
//! against the shared [`ToolCtx`], compose exactly one user-facing reply,
//! and deliver it through the environment's reply sink. Failures inside an
//! operation become composed replies, not errors; a tool only returns
//! `Err` when its arguments are malformed.

pub mod accept_liquidity;
pub mod ctx;
pub mod docs;
pub mod lender_positions;
pub mod mint_vault;
pub mod pending_requests;
pub mod process_claims;
pub mod repay_loan;
pub mod request_liquidity;
pub mod token;
pub mod token_registration;
pub mod transfer_near;

pub use ctx::ToolCtx;

use std::sync::Arc;
use sudostake_core::ToolRegistry;

/// Build a registry with the full catalog registered against `ctx`.
pub fn catalog(ctx: Arc<ToolCtx>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(repay_loan::RepayLoanTool::new(ctx.clone())));
    registry.register(Box::new(process_claims::ProcessClaimsTool::new(ctx.clone())));
    registry.register(Box::new(request_liquidity::RequestLiquidityTool::new(
        ctx.clone(),
    )));
    registry.register(Box::new(accept_liquidity::AcceptLiquidityTool::new(
        ctx.clone(),
    )));
    registry.register(Box::new(mint_vault::MintVaultTool::new(ctx.clone())));
    registry.register(Box::new(transfer_near::TransferNearTool::new(ctx.clone())));
    registry.register(Box::new(
        token_registration::TokenRegistrationTool::new(ctx.clone()),
    ));
    registry.register(Box::new(pending_requests::PendingRequestsTool::new(
        ctx.clone(),
    )));
    registry.register(Box::new(lender_positions::LenderPositionsTool::new(
        ctx.clone(),
    )));
    registry.register(Box::new(docs::QueryDocsTool::new(ctx)));
    registry
}
