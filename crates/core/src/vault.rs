//! On-chain vault state shapes, as returned by `get_vault_state`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Terms of a liquidity request. Token amounts are strings in the token's
/// smallest unit; collateral is a yoctoNEAR string; duration is seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityRequestTerms {
    pub token: String,
    pub amount: String,
    pub interest: String,
    pub collateral: String,
    pub duration: u64,
}

/// A lender's commitment that activated the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedOffer {
    pub lender: String,
    /// Firestore-style timestamp (`{"_seconds": ...}`) or a plain value;
    /// kept loose because both shapes occur in the index API.
    #[serde(default)]
    pub accepted_at: Option<Value>,
}

/// Liquidation bookkeeping, present once claims processing has started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidationState {
    /// yoctoNEAR repaid to the lender so far.
    #[serde(default)]
    pub liquidated: Option<String>,
}

/// The subset of vault contract state the agent reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultState {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub liquidity_request: Option<LiquidityRequestTerms>,
    #[serde(default)]
    pub accepted_offer: Option<AcceptedOffer>,
    #[serde(default)]
    pub liquidation: Option<LiquidationState>,
}
