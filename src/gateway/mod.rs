//! Contract gateway.
//!
//! The deployment procedure talks to the chain only through
//! [`ContractGateway`]: upload bytecode, instantiate a code ID, run a smart
//! query. [`CosmWasmGateway`] implements it against a live chain; tests swap
//! in an in-memory double.

pub mod cosmwasm;

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::chain::ChainResult;

pub use cosmwasm::CosmWasmGateway;

/// Event and attribute carrying the code ID of an upload.
pub const STORE_CODE_EVENT: &str = "store_code";
pub const CODE_ID_ATTRIBUTE: &str = "code_id";

/// Event and attribute carrying the address of a new contract.
pub const INSTANTIATE_EVENT: &str = "instantiate";
pub const CONTRACT_ADDRESS_ATTRIBUTE: &str = "_contract_address";

/// Result of a bytecode upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub code_id: u64,
    pub tx_hash: String,
}

/// Result of a contract instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiateResponse {
    pub contract_address: String,
    pub tx_hash: String,
}

#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Address of the signing identity used for upload and instantiate.
    fn sender(&self) -> &str;

    /// Upload contract bytecode.
    async fn upload(&self, path: &Path) -> ChainResult<UploadResponse>;

    /// Create a contract instance from `code_id`.
    ///
    /// The sender is always the instantiator; `admin` may differ.
    async fn instantiate(
        &self,
        admin: Option<&str>,
        code_id: u64,
        msg: &Value,
        label: &str,
    ) -> ChainResult<InstantiateResponse>;

    /// Run a read-only smart query.
    async fn query(&self, contract: &str, msg: &Value) -> ChainResult<Value>;
}
