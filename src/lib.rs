//! CW20 token deployer library.
//!
//! Uploads token bytecode to a CosmWasm chain, instantiates it, verifies the
//! initial balance with read-only queries and records the result in a
//! per-chain artifact file.

pub mod artifacts;
pub mod chain;
pub mod config;
pub mod deploy;
pub mod gateway;
pub mod observability;
pub mod token;

pub use artifacts::{ArtifactStore, FileArtifactStore, NetworkArtifact};
pub use config::DeployConfig;
pub use deploy::{deploy_token, DeployError, DeployParams, Deployment};
pub use gateway::{ContractGateway, CosmWasmGateway};
