//! Chain-specific types and error definitions.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainId(pub String);

impl ChainId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// LCD endpoint is not a usable URL.
    #[error("Invalid LCD endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// LCD answered with a non-success status.
    #[error("LCD returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// LCD request timed out.
    #[error("LCD request timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not included within the deadline.
    #[error("Transaction {tx_hash} not included after {secs} seconds")]
    ConfirmationTimeout { tx_hash: String, secs: u64 },

    /// Transaction was rejected by the mempool or failed on-chain.
    #[error("Transaction rejected with code {code}: {log}")]
    Rejected { code: u32, log: String },

    /// Invalid mnemonic, derivation path or key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Node reports a different chain than configured.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: String, actual: String },

    /// Building or signing a transaction failed.
    #[error("Transaction encoding error: {0}")]
    Encoding(String),

    /// Response body did not match the documented schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A transaction succeeded but lacks an expected event attribute.
    #[error("Event '{event}' has no attribute '{attribute}'")]
    MissingEventAttribute { event: String, attribute: String },

    /// Contract bytecode could not be read.
    #[error("Cannot read bytecode at {}: {source}", path.display())]
    Bytecode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Account number and sequence needed to sign a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

/// A single key/value attribute of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// An ABCI event emitted by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

/// An included transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: String,
    pub height: u64,
    pub gas_used: u64,
    pub events: Vec<Event>,
}

impl TxOutcome {
    /// Look up an attribute by event type and key.
    ///
    /// Returns the first match across all events of that type.
    pub fn attribute(&self, event: &str, key: &str) -> ChainResult<&str> {
        self.events
            .iter()
            .filter(|e| e.kind == event)
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
            .ok_or_else(|| ChainError::MissingEventAttribute {
                event: event.to_string(),
                attribute: key.to_string(),
            })
    }
}

/// LCD encodes 64-bit integers as strings; accept either form.
pub(crate) fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u64),
        Str(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
