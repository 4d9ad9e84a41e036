//! Token deployment.

pub mod error;
pub mod procedure;

use std::path::PathBuf;

use cosmwasm_std::Uint128;
use cw20::{MinterResponse, TokenInfoResponse};

use crate::config::validation::ValidationError;
use crate::config::{ConfigError, DeployConfig, TokenConfig};

pub use error::{DeployError, DeployResult};
pub use procedure::deploy_token;

/// Inputs of one deployment run, fully resolved.
#[derive(Debug, Clone)]
pub struct DeployParams {
    pub binary_path: PathBuf,
    pub initial_amount: Uint128,
    pub label: String,
    pub token: TokenConfig,
}

impl TryFrom<&DeployConfig> for DeployParams {
    type Error = ConfigError;

    fn try_from(config: &DeployConfig) -> Result<Self, Self::Error> {
        let initial_amount = config
            .deploy
            .initial_amount
            .parse::<Uint128>()
            .map_err(|e| {
                ConfigError::Validation(vec![ValidationError {
                    field: "deploy.initial_amount",
                    message: e.to_string(),
                }])
            })?;

        Ok(Self {
            binary_path: PathBuf::from(&config.deploy.binary_path),
            initial_amount,
            label: config.deploy.label.clone(),
            token: config.token.clone(),
        })
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub chain_id: String,
    pub code_id: u64,
    pub contract_address: String,
    pub upload_tx: String,
    pub instantiate_tx: String,
    pub token_info: TokenInfoResponse,
    pub minter: Option<MinterResponse>,
    pub balance: Uint128,
}
