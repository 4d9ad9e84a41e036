//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a deployment run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the token deployer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeployConfig {
    /// Chain connection settings.
    pub network: NetworkConfig,

    /// What to deploy and where to record it.
    pub deploy: DeploySettings,

    /// Token metadata sent in the instantiate message.
    pub token: TokenConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// LCD (REST) endpoint URL.
    pub lcd_url: String,

    /// Chain ID (e.g. "pisco-1", "localterra").
    pub chain_id: String,

    /// Bech32 prefix for account addresses.
    pub account_prefix: String,

    /// BIP-32 derivation path for the signing key.
    pub hd_path: String,

    /// Denom used to pay transaction fees.
    pub fee_denom: String,

    /// Gas price in `fee_denom` per unit of gas.
    pub gas_price: f64,

    /// Gas limit for bytecode upload.
    pub upload_gas_limit: u64,

    /// Gas limit for contract instantiation.
    pub instantiate_gas_limit: u64,

    /// LCD request timeout in seconds.
    pub request_timeout_secs: u64,

    /// How long to wait for a broadcast transaction to be included.
    pub tx_timeout_secs: u64,

    /// Poll interval while waiting for inclusion, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            lcd_url: "http://localhost:1317".to_string(),
            chain_id: "localterra".to_string(),
            account_prefix: "terra".to_string(),
            hd_path: "m/44'/330'/0'/0/0".to_string(),
            fee_denom: "uluna".to_string(),
            gas_price: 0.15,
            upload_gas_limit: 5_000_000,
            instantiate_gas_limit: 500_000,
            request_timeout_secs: 10,
            tx_timeout_secs: 60,
            poll_interval_ms: 1_000,
        }
    }
}

/// Deployment inputs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploySettings {
    /// Path to the compiled CW20 bytecode.
    pub binary_path: String,

    /// Initial balance minted to the signer, as a decimal string.
    pub initial_amount: String,

    /// Directory holding one artifact file per chain ID.
    pub artifacts_dir: String,

    /// Human-readable contract label.
    pub label: String,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            binary_path: super::DEFAULT_BINARY_PATH.to_string(),
            initial_amount: super::DEFAULT_INITIAL_AMOUNT.to_string(),
            artifacts_dir: super::DEFAULT_ARTIFACTS_DIR.to_string(),
            label: "Astroport Token".to_string(),
        }
    }
}

/// Token metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,

    /// Marketing project name.
    pub project: String,

    pub description: String,

    /// Logo URL shown by wallets and explorers.
    pub logo_url: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Astroport".to_string(),
            symbol: "ASTRO".to_string(),
            decimals: 6,
            project: "Astroport".to_string(),
            description: "Astroport is a neutral marketplace where anyone, from anywhere in the galaxy, can dock to trade their wares.".to_string(),
            logo_url: "https://astroport.fi/astro_logo.png".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "token_deploy=info".to_string(),
            json_logs: false,
        }
    }
}
