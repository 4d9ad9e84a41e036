//! Wallet management and transaction signing keys.
//!
//! # Security
//! - The mnemonic is loaded ONLY from the environment
//! - Keys and mnemonics are never logged or serialized

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use cosmrs::crypto::secp256k1::SigningKey;
use cosmrs::crypto::PublicKey;
use cosmrs::AccountId;

use crate::chain::types::{ChainError, ChainResult};

/// Environment variable holding the signer's BIP-39 mnemonic.
pub const MNEMONIC_ENV_VAR: &str = "WALLET";

/// Signing identity derived from a mnemonic.
pub struct Wallet {
    signing_key: SigningKey,
    public_key: PublicKey,
    account_id: AccountId,
}

impl Wallet {
    /// Derive a wallet from a BIP-39 mnemonic.
    ///
    /// # Arguments
    /// * `phrase` - 12, 15, 18, 21 or 24 English words; extra whitespace is ignored
    /// * `hd_path` - BIP-32 derivation path, e.g. `m/44'/330'/0'/0/0`
    /// * `prefix` - Bech32 account prefix, e.g. `terra`
    pub fn from_mnemonic(phrase: &str, hd_path: &str, prefix: &str) -> ChainResult<Self> {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|e| ChainError::Wallet(format!("Invalid mnemonic: {}", e)))?;

        let path: DerivationPath = hd_path
            .parse()
            .map_err(|e| ChainError::Wallet(format!("Invalid HD path '{}': {}", hd_path, e)))?;

        let seed = mnemonic.to_seed("");
        let xprv = XPrv::derive_from_path(&seed, &path)
            .map_err(|e| ChainError::Wallet(format!("Key derivation failed: {}", e)))?;

        let signing_key = SigningKey::from_slice(&xprv.private_key().to_bytes())
            .map_err(|e| ChainError::Wallet(format!("Invalid signing key: {}", e)))?;
        let public_key = signing_key.public_key();
        let account_id = public_key
            .account_id(prefix)
            .map_err(|e| ChainError::Wallet(format!("Invalid account prefix '{}': {}", prefix, e)))?;

        tracing::info!(address = %account_id, "Wallet initialized");

        Ok(Self {
            signing_key,
            public_key,
            account_id,
        })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `WALLET` from environment. A set but empty value counts as missing.
    pub fn from_env(hd_path: &str, prefix: &str) -> ChainResult<Self> {
        let phrase = std::env::var(MNEMONIC_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ChainError::Wallet(format!("Environment variable {} not set", MNEMONIC_ENV_VAR))
            })?;

        Self::from_mnemonic(&phrase, hd_path, prefix)
    }

    /// Bech32 account address.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Bech32 account address as a string.
    pub fn address(&self) -> String {
        self.account_id.to_string()
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.account_id.to_string())
            .finish_non_exhaustive()
    }
}
