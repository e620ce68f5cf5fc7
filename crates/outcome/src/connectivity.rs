//! Detection of RPC/DNS unreachability, with a network-mismatch hint.
//!
//! A failed RPC round-trip usually means either real network trouble or the
//! agent pointing at the wrong NEAR network for the vault in question. The
//! hint names both the configured network and the one the vault's account
//! suffix suggests.

use sudostake_core::Network;

const INDICATORS: &[&str] = &[
    "RPC not available",
    "nodename nor servname",
    "Name or service not known",
    "getaddrinfo",
    "Failed to establish a new connection",
    "Max retries exceeded",
    "Temporary failure in name resolution",
];

/// True when the error text looks like transport-level unreachability
/// rather than an application error.
pub fn is_connectivity_error(error_text: &str) -> bool {
    INDICATORS.iter().any(|needle| error_text.contains(needle))
}

/// A one-paragraph actionable hint for a connectivity failure, or `None`
/// when the error does not look like one. Never fails.
pub fn rpc_connectivity_hint(
    error_text: &str,
    target_account_id: &str,
    configured: Network,
) -> Option<String> {
    if !is_connectivity_error(error_text) {
        return None;
    }

    let suggested = Network::suggested_for_account(target_account_id);
    Some(format!(
        "📡 RPC appears unreachable.\n\
         - Configured network: `{configured}` (vault looks like `{suggested}`)\n\
         - Tip: set `NEAR_NETWORK={suggested}` for this vault.\n\
         - Check your network/DNS and retry shortly."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_indicator() {
        for indicator in INDICATORS {
            assert!(
                is_connectivity_error(&format!("error: {indicator} (os 8)")),
                "expected match for {indicator}"
            );
        }
    }

    #[test]
    fn application_errors_do_not_match() {
        assert!(!is_connectivity_error("Smart contract panicked: boom"));
        assert!(rpc_connectivity_hint("boom", "vault.testnet", Network::Testnet).is_none());
    }

    #[test]
    fn hint_names_both_networks_on_mismatch() {
        let hint = rpc_connectivity_hint(
            "getaddrinfo ENOTFOUND rpc",
            "vault-dns.factory.testnet",
            Network::Mainnet,
        )
        .unwrap();
        assert!(hint.contains("RPC appears unreachable"));
        assert!(hint.contains("`mainnet`"));
        assert!(hint.contains("NEAR_NETWORK=testnet"));
    }

    #[test]
    fn mainnet_suffix_suggests_mainnet() {
        let hint = rpc_connectivity_hint(
            "Max retries exceeded with url",
            "vault-0.sudostake.near",
            Network::Testnet,
        )
        .unwrap();
        assert!(hint.contains("NEAR_NETWORK=mainnet"));
    }
}
