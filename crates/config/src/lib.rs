//! Configuration loading, validation, and network profiles.
//!
//! Loads configuration from a TOML file with environment variable
//! overrides (`NEAR_NETWORK`, `NEAR_ACCOUNT_ID`, `NEAR_PRIVATE_KEY`,
//! `SUDOSTAKE_RPC_URL`, `SUDOSTAKE_INDEX_API`). Validates all settings at
//! startup and resolves a per-network [`NetworkProfile`] of endpoints and
//! well-known contract addresses.

use serde::{Deserialize, Serialize};
use std::path::Path;
use sudostake_core::Network;
use tracing::debug;

/// Errors from the configuration subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Target NEAR network
    #[serde(default = "default_network")]
    pub network: Network,

    /// Signer account (headless mode); usually from `NEAR_ACCOUNT_ID`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Signer private key (headless mode); usually from `NEAR_PRIVATE_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// Vector store holding the SudoStake documentation
    #[serde(default = "default_vector_store_id")]
    pub vector_store_id: String,

    /// Base URL of the vault indexing/listing API
    #[serde(default = "default_index_api_base")]
    pub index_api_base: String,

    /// RPC endpoint override; defaults per network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Explorer URL override; defaults per network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,

    /// Vault factory contract override; defaults per network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_id: Option<String>,

    /// USDC token contract override; defaults per network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usdc_contract: Option<String>,

    /// Vault minting fee in whole NEAR
    #[serde(default = "default_mint_fee_near")]
    pub vault_mint_fee_near: u64,
}

fn default_network() -> Network {
    Network::Testnet
}
fn default_vector_store_id() -> String {
    "vs_ecd9ba192396493984d66feb".into()
}
fn default_index_api_base() -> String {
    "https://v0-sudo-stake-near-web.vercel.app/api".into()
}
fn default_mint_fee_near() -> u64 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            network: default_network(),
            account_id: None,
            private_key: None,
            vector_store_id: default_vector_store_id(),
            index_api_base: default_index_api_base(),
            rpc_url: None,
            explorer_url: None,
            factory_id: None,
            usdc_contract: None,
            vault_mint_fee_near: default_mint_fee_near(),
        }
    }
}

/// Resolved endpoints and contract addresses for one network.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub network: Network,
    pub rpc_url: String,
    pub explorer_url: String,
    pub factory_id: String,
    pub usdc_contract: String,
    pub index_api_base: String,
}

fn default_rpc_url(network: Network) -> &'static str {
    match network {
        Network::Mainnet => "https://rpc.mainnet.near.org",
        Network::Testnet => "https://rpc.testnet.near.org",
    }
}

fn default_explorer_url(network: Network) -> &'static str {
    match network {
        Network::Mainnet => "https://explorer.near.org",
        Network::Testnet => "https://explorer.testnet.near.org",
    }
}

fn default_factory_id(network: Network) -> &'static str {
    match network {
        Network::Mainnet => "sudostake.near",
        Network::Testnet => "nzaza.testnet",
    }
}

fn default_usdc_contract(network: Network) -> &'static str {
    match network {
        Network::Mainnet => "17208628f84f5d6ad33f0da3bbbeb27ffcb398eac501a31bd6ad2011e36133a1",
        Network::Testnet => "usdc.tkn.primitives.testnet",
    }
}

impl AgentConfig {
    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or start from defaults when the file is absent,
    /// then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading config file");
                toml::from_str(&std::fs::read_to_string(path)?)?
            }
            _ => AgentConfig::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(network) = std::env::var("NEAR_NETWORK") {
            if let Ok(network) = network.parse() {
                self.network = network;
            }
        }
        if let Ok(account_id) = std::env::var("NEAR_ACCOUNT_ID") {
            self.account_id = Some(account_id);
        }
        if let Ok(private_key) = std::env::var("NEAR_PRIVATE_KEY") {
            self.private_key = Some(private_key);
        }
        if let Ok(rpc_url) = std::env::var("SUDOSTAKE_RPC_URL") {
            self.rpc_url = Some(rpc_url);
        }
        if let Ok(base) = std::env::var("SUDOSTAKE_INDEX_API") {
            self.index_api_base = base;
        }
    }

    /// Validate all settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vault_mint_fee_near == 0 {
            return Err(ConfigError::Invalid(
                "vault_mint_fee_near must be non-zero".into(),
            ));
        }
        if self.index_api_base.is_empty() {
            return Err(ConfigError::Invalid("index_api_base must be set".into()));
        }
        if let Some(url) = self.rpc_url.as_deref().or(self.explorer_url.as_deref()) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "endpoint URLs must start with http:// or https:// (got: {url})"
                )));
            }
        }
        if self.account_id.is_some() != self.private_key.is_some() {
            return Err(ConfigError::Invalid(
                "account_id and private_key must be set together for headless signing".into(),
            ));
        }
        Ok(())
    }

    /// True when both signing secrets are present.
    pub fn has_signing_keys(&self) -> bool {
        self.account_id.is_some() && self.private_key.is_some()
    }

    /// Resolve the effective endpoints and contracts for the configured
    /// network, applying any overrides.
    pub fn profile(&self) -> NetworkProfile {
        let network = self.network;
        NetworkProfile {
            network,
            rpc_url: self
                .rpc_url
                .clone()
                .unwrap_or_else(|| default_rpc_url(network).to_string()),
            explorer_url: self
                .explorer_url
                .clone()
                .unwrap_or_else(|| default_explorer_url(network).to_string()),
            factory_id: self
                .factory_id
                .clone()
                .unwrap_or_else(|| default_factory_id(network).to_string()),
            usdc_contract: self
                .usdc_contract
                .clone()
                .unwrap_or_else(|| default_usdc_contract(network).to_string()),
            index_api_base: self.index_api_base.clone(),
        }
    }
}
