//! [`ContractGateway`] backed by a CosmWasm chain's LCD endpoint.

use std::path::Path;

use async_trait::async_trait;
use cosmrs::cosmwasm::{MsgInstantiateContract, MsgStoreCode};
use cosmrs::tx::Msg;
use cosmrs::AccountId;
use serde_json::Value;

use crate::chain::{ChainError, ChainResult, TxBuilder};
use crate::gateway::{
    ContractGateway, InstantiateResponse, UploadResponse, CODE_ID_ATTRIBUTE,
    CONTRACT_ADDRESS_ATTRIBUTE, INSTANTIATE_EVENT, STORE_CODE_EVENT,
};

/// Gateway that signs with the connected wallet and submits through the LCD.
#[derive(Clone)]
pub struct CosmWasmGateway {
    tx: TxBuilder,
    sender: String,
}

impl CosmWasmGateway {
    pub fn new(tx: TxBuilder) -> Self {
        let sender = tx.wallet().address();
        Self { tx, sender }
    }

    pub fn chain_id(&self) -> &str {
        &self.tx.client().config().chain_id
    }
}

#[async_trait]
impl ContractGateway for CosmWasmGateway {
    fn sender(&self) -> &str {
        &self.sender
    }

    async fn upload(&self, path: &Path) -> ChainResult<UploadResponse> {
        let wasm_byte_code = tokio::fs::read(path)
            .await
            .map_err(|source| ChainError::Bytecode {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = wasm_byte_code.len(),
            "Uploading contract bytecode"
        );

        let msg = MsgStoreCode {
            sender: self.tx.wallet().account_id().clone(),
            wasm_byte_code,
            instantiate_permission: None,
        }
        .to_any()
        .map_err(|e| ChainError::Encoding(e.to_string()))?;

        let gas_limit = self.tx.client().config().upload_gas_limit;
        let outcome = self.tx.submit(msg, gas_limit).await?;

        let raw = outcome.attribute(STORE_CODE_EVENT, CODE_ID_ATTRIBUTE)?;
        let code_id = raw.parse::<u64>().map_err(|_| {
            ChainError::MalformedResponse(format!("code_id '{}' is not an integer", raw))
        })?;

        Ok(UploadResponse {
            code_id,
            tx_hash: outcome.tx_hash,
        })
    }

    async fn instantiate(
        &self,
        admin: Option<&str>,
        code_id: u64,
        msg: &Value,
        label: &str,
    ) -> ChainResult<InstantiateResponse> {
        let admin = admin
            .map(|a| {
                a.parse::<AccountId>()
                    .map_err(|e| ChainError::Encoding(format!("Invalid admin '{}': {}", a, e)))
            })
            .transpose()?;
        let init_msg = serde_json::to_vec(msg).map_err(|e| ChainError::Encoding(e.to_string()))?;

        let msg = MsgInstantiateContract {
            sender: self.tx.wallet().account_id().clone(),
            admin,
            code_id,
            label: Some(label.to_string()),
            msg: init_msg,
            funds: Vec::new(),
        }
        .to_any()
        .map_err(|e| ChainError::Encoding(e.to_string()))?;

        let gas_limit = self.tx.client().config().instantiate_gas_limit;
        let outcome = self.tx.submit(msg, gas_limit).await?;

        let contract_address = outcome
            .attribute(INSTANTIATE_EVENT, CONTRACT_ADDRESS_ATTRIBUTE)?
            .to_string();
        contract_address.parse::<AccountId>().map_err(|e| {
            ChainError::MalformedResponse(format!(
                "contract address '{}' is not bech32: {}",
                contract_address, e
            ))
        })?;

        Ok(InstantiateResponse {
            contract_address,
            tx_hash: outcome.tx_hash,
        })
    }

    async fn query(&self, contract: &str, msg: &Value) -> ChainResult<Value> {
        self.tx.client().smart_query(contract, msg).await
    }
}

impl std::fmt::Debug for CosmWasmGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmWasmGateway")
            .field("sender", &self.sender)
            .field("chain_id", &self.chain_id())
            .finish()
    }
}
