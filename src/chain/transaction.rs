//! Transaction building, signing, and inclusion monitoring.
//!
//! # Responsibilities
//! - Fetch account number and sequence for the signer
//! - Build a single-message transaction with a fixed gas limit
//! - Sign (SIGN_MODE_DIRECT), broadcast, and wait for inclusion

use std::sync::Arc;

use cosmrs::tendermint::chain::Id as TendermintChainId;
use cosmrs::tx::{Body, Fee, SignDoc, SignerInfo};
use cosmrs::{Any, Coin, Denom};

use crate::chain::client::LcdClient;
use crate::chain::types::{ChainError, ChainResult, TxOutcome};
use crate::chain::wallet::Wallet;

/// Transaction builder for the signer's own transactions.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    client: LcdClient,
    wallet: Arc<Wallet>,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: LcdClient, wallet: Arc<Wallet>) -> Self {
        Self { client, wallet }
    }

    /// Sign and broadcast `msg`, then wait until it is included.
    ///
    /// # Arguments
    /// * `msg` - Protobuf-encoded Cosmos message
    /// * `gas_limit` - Gas limit; the fee is derived from it and the configured gas price
    pub async fn submit(&self, msg: Any, gas_limit: u64) -> ChainResult<TxOutcome> {
        let tx_bytes = self.sign(msg, gas_limit).await?;
        let tx_hash = self.client.broadcast(&tx_bytes).await?;

        tracing::info!(tx_hash = %tx_hash, gas_limit = gas_limit, "Transaction broadcast");

        let outcome = self.client.wait_for_tx(&tx_hash).await?;

        tracing::info!(
            tx_hash = %outcome.tx_hash,
            height = outcome.height,
            gas_used = outcome.gas_used,
            "Transaction included"
        );
        Ok(outcome)
    }

    /// Build and sign a transaction carrying `msg`.
    pub async fn sign(&self, msg: Any, gas_limit: u64) -> ChainResult<Vec<u8>> {
        let config = self.client.config();
        let account = self.client.account(&self.wallet.address()).await?;

        let chain_id: TendermintChainId = config
            .chain_id
            .parse()
            .map_err(|e| ChainError::Encoding(format!("Invalid chain ID '{}': {}", config.chain_id, e)))?;
        let denom: Denom = config
            .fee_denom
            .parse()
            .map_err(|e| ChainError::Encoding(format!("Invalid fee denom '{}': {}", config.fee_denom, e)))?;

        let fee = Fee::from_amount_and_gas(
            Coin {
                denom,
                amount: fee_amount(gas_limit, config.gas_price),
            },
            gas_limit,
        );

        let body = Body::new(vec![msg], "", 0u16);
        let auth_info =
            SignerInfo::single_direct(Some(self.wallet.public_key()), account.sequence).auth_info(fee);

        let sign_doc = SignDoc::new(&body, &auth_info, &chain_id, account.account_number)
            .map_err(|e| ChainError::Encoding(e.to_string()))?;
        let raw = sign_doc
            .sign(self.wallet.signing_key())
            .map_err(|e| ChainError::Encoding(format!("Signing failed: {}", e)))?;

        raw.to_bytes().map_err(|e| ChainError::Encoding(e.to_string()))
    }

    /// Get the signer.
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Get the LCD client.
    pub fn client(&self) -> &LcdClient {
        &self.client
    }
}

/// Fee for `gas_limit` at `gas_price`, rounded up to a whole base unit.
pub fn fee_amount(gas_limit: u64, gas_price: f64) -> u128 {
    (gas_limit as f64 * gas_price).ceil() as u128
}
