//! Deployment errors.

use cosmwasm_std::Uint128;
use thiserror::Error;

use crate::artifacts::ArtifactError;
use crate::chain::ChainError;
use crate::config::ConfigError;

/// Errors that abort a deployment run, tagged by the step that failed.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Wallet derivation or chain connection failed.
    #[error("Setup failed: {0}")]
    Setup(#[source] ChainError),

    #[error("Upload failed: {0}")]
    Upload(#[source] ChainError),

    #[error("Instantiate failed: {0}")]
    Instantiate(#[source] ChainError),

    #[error("Query '{kind}' failed: {source}")]
    Query {
        kind: &'static str,
        #[source]
        source: ChainError,
    },

    /// The contract answered a query with an unexpected shape.
    #[error("Malformed '{kind}' response: {source}")]
    MalformedResponse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Balance mismatch: expected {expected}, got {actual}")]
    BalanceMismatch { expected: Uint128, actual: Uint128 },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

pub type DeployResult<T> = Result<T, DeployError>;
