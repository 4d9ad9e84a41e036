//! Deployment artifacts.
//!
//! # Responsibilities
//! - Keep one JSON record per chain ID of what has been deployed there
//! - Carry unknown keys from earlier runs forward untouched
//!
//! # Design Decisions
//! - A missing record reads as empty; a corrupt one is an error
//! - Writes replace the whole record atomically (temp file + rename)

pub mod file;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use file::FileArtifactStore;

/// Key under which the uploaded token code ID is recorded.
pub const TOKEN_CODE_ID_KEY: &str = "tokenCodeID";

/// Key under which the instantiated token address is recorded.
pub const TOKEN_ADDRESS_KEY: &str = "tokenAddress";

/// Errors reading or writing artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact I/O error for chain {chain_id}: {source}")]
    Io {
        chain_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact for chain {chain_id} is not a JSON object: {source}")]
    Parse {
        chain_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Chain ID '{0}' cannot be used as an artifact name")]
    InvalidChainId(String),
}

pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Open key/value record of deployment results for one chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkArtifact(Map<String, Value>);

impl NetworkArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn token_code_id(&self) -> Option<u64> {
        self.get(TOKEN_CODE_ID_KEY).and_then(Value::as_u64)
    }

    pub fn token_address(&self) -> Option<&str> {
        self.get(TOKEN_ADDRESS_KEY).and_then(Value::as_str)
    }
}

/// Persistence for per-chain artifacts.
pub trait ArtifactStore {
    /// Load the record for `chain_id`, or an empty one if none exists.
    fn read(&self, chain_id: &str) -> ArtifactResult<NetworkArtifact>;

    /// Replace the record for `chain_id`.
    fn write(&self, artifact: &NetworkArtifact, chain_id: &str) -> ArtifactResult<()>;
}
