//! Per-turn session context.
//!
//! Signing mode and account id are an explicit value constructed once per
//! agent turn and passed to every tool — never process-global state.

use crate::network::Network;

/// How (and whether) this session can sign transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    /// A private key is available; state-changing calls are allowed.
    Headless,
    /// No key material; view calls only.
    ViewOnly,
}

/// Context for one agent turn.
#[derive(Debug, Clone)]
pub struct Session {
    pub signing_mode: SigningMode,
    /// The user's account when known (signer account in headless mode).
    pub account_id: Option<String>,
    pub network: Network,
}

impl Session {
    /// A headless session for `account_id` on `network`.
    pub fn headless(account_id: impl Into<String>, network: Network) -> Self {
        Session {
            signing_mode: SigningMode::Headless,
            account_id: Some(account_id.into()),
            network,
        }
    }

    /// A view-only session on `network`.
    pub fn view_only(network: Network) -> Self {
        Session {
            signing_mode: SigningMode::ViewOnly,
            account_id: None,
            network,
        }
    }

    /// True when this session can submit state-changing transactions.
    pub fn can_sign(&self) -> bool {
        self.signing_mode == SigningMode::Headless
    }
}
