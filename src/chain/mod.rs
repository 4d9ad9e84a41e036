//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (mnemonic, LCD URL, chain ID)
//!     → wallet.rs (key derivation, signing identity)
//!     → client.rs (LCD connection with timeouts)
//!     → transaction.rs (build, sign, broadcast, wait for inclusion)
//! ```
//!
//! # Security Constraints
//! - Mnemonics ONLY from environment variables
//! - Never log mnemonics or key material
//! - All LCD calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

use std::sync::Arc;

pub use client::LcdClient;
pub use transaction::TxBuilder;
pub use types::{ChainError, ChainId, ChainResult, TxOutcome};
pub use wallet::Wallet;

use crate::config::NetworkConfig;

/// Connect to the configured chain with the signer from the environment.
///
/// Fails if the mnemonic is missing or invalid, the LCD is unreachable, or the
/// node serves a different chain than configured.
pub async fn connect(config: &NetworkConfig) -> ChainResult<TxBuilder> {
    let wallet = Wallet::from_env(&config.hd_path, &config.account_prefix)?;
    connect_with_wallet(config, wallet).await
}

/// Connect to the configured chain with an already derived signer.
pub async fn connect_with_wallet(config: &NetworkConfig, wallet: Wallet) -> ChainResult<TxBuilder> {
    let client = LcdClient::new(config.clone())?;
    client.verify_chain_id().await?;
    Ok(TxBuilder::new(client, Arc::new(wallet)))
}
