//! NEAR network selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The NEAR network the session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Suggest a network from an account id suffix.
    ///
    /// Accounts ending in `.testnet` live on testnet; everything else is
    /// assumed to be mainnet. Used by the connectivity hint classifier to
    /// flag a likely network mismatch.
    pub fn suggested_for_account(account_id: &str) -> Network {
        if account_id.ends_with(".testnet") {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!(
                "NEAR_NETWORK must be 'mainnet' or 'testnet' (got: {other})"
            )),
        }
    }
}
