//! The deployment procedure.
//!
//! ```text
//! read artifact → upload → build init msg → instantiate
//!     → token_info / minter / balance queries → assert balance → write artifact
//! ```
//!
//! Every step propagates its error. The artifact is written last, so a failed
//! run leaves the previous record on disk untouched even though upload and
//! instantiate may already have changed chain state.

use cw20::{BalanceResponse, Cw20QueryMsg, MinterResponse, TokenInfoResponse};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use crate::artifacts::{ArtifactStore, TOKEN_ADDRESS_KEY, TOKEN_CODE_ID_KEY};
use crate::deploy::error::{DeployError, DeployResult};
use crate::deploy::{DeployParams, Deployment};
use crate::gateway::ContractGateway;
use crate::observability::logging;
use crate::token;

/// Upload, instantiate and verify a CW20 token, then record it for `chain_id`.
///
/// Always uploads and instantiates afresh; an existing `tokenAddress` in the
/// artifact is overwritten, not reused.
pub async fn deploy_token<G, S>(
    gateway: &G,
    store: &S,
    chain_id: &str,
    params: &DeployParams,
) -> DeployResult<Deployment>
where
    G: ContractGateway + ?Sized,
    S: ArtifactStore + ?Sized,
{
    let span = tracing::info_span!("deploy", run_id = %Uuid::new_v4(), chain_id = %chain_id);
    run(gateway, store, chain_id, params).instrument(span).await
}

async fn run<G, S>(
    gateway: &G,
    store: &S,
    chain_id: &str,
    params: &DeployParams,
) -> DeployResult<Deployment>
where
    G: ContractGateway + ?Sized,
    S: ArtifactStore + ?Sized,
{
    let sender = gateway.sender().to_string();

    let mut artifact = store.read(chain_id)?;
    tracing::info!(
        existing_keys = artifact.keys().count(),
        previous_address = artifact.token_address().unwrap_or("-"),
        "Artifact loaded"
    );

    let upload = gateway
        .upload(&params.binary_path)
        .await
        .map_err(DeployError::Upload)?;
    artifact.set(TOKEN_CODE_ID_KEY, upload.code_id);
    tracing::info!(code_id = upload.code_id, tx_hash = %upload.tx_hash, "Bytecode uploaded");

    let init_msg = token::single_holder(&params.token, &sender, params.initial_amount);
    let init_msg = serde_json::to_value(&init_msg).map_err(DeployError::Encode)?;

    let instantiated = gateway
        .instantiate(Some(&sender), upload.code_id, &init_msg, &params.label)
        .await
        .map_err(DeployError::Instantiate)?;
    let contract_address = instantiated.contract_address;
    tracing::info!(
        address = %contract_address,
        tx_hash = %instantiated.tx_hash,
        "Token instantiated"
    );

    let token_info: TokenInfoResponse =
        query(gateway, &contract_address, &Cw20QueryMsg::TokenInfo {}).await?;
    let minter: Option<MinterResponse> =
        query(gateway, &contract_address, &Cw20QueryMsg::Minter {}).await?;
    let balance: BalanceResponse = query(
        gateway,
        &contract_address,
        &Cw20QueryMsg::Balance {
            address: sender.clone(),
        },
    )
    .await?;

    if balance.balance != params.initial_amount {
        return Err(DeployError::BalanceMismatch {
            expected: params.initial_amount,
            actual: balance.balance,
        });
    }

    artifact.set(TOKEN_ADDRESS_KEY, contract_address.clone());
    store.write(&artifact, chain_id)?;

    Ok(Deployment {
        chain_id: chain_id.to_string(),
        code_id: upload.code_id,
        contract_address,
        upload_tx: upload.tx_hash,
        instantiate_tx: instantiated.tx_hash,
        token_info,
        minter,
        balance: balance.balance,
    })
}

async fn query<G, T>(gateway: &G, contract: &str, msg: &Cw20QueryMsg) -> DeployResult<T>
where
    G: ContractGateway + ?Sized,
    T: DeserializeOwned,
{
    let kind = token::query_kind(msg);
    let request = serde_json::to_value(msg).map_err(DeployError::Encode)?;

    let raw = gateway
        .query(contract, &request)
        .await
        .map_err(|source| DeployError::Query { kind, source })?;
    logging::query_response(kind, &raw);

    serde_json::from_value(raw).map_err(|source| DeployError::MalformedResponse { kind, source })
}
