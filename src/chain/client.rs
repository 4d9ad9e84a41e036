//! LCD (REST) client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the chain's LCD endpoint
//! - Query chain state (node info, accounts, transactions)
//! - Broadcast signed transactions and wait for their inclusion
//! - Run CosmWasm smart queries

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::{interval, timeout};

use crate::chain::types::{
    de_u64, AccountInfo, ChainError, ChainId, ChainResult, Event, TxOutcome,
};
use crate::config::NetworkConfig;

#[derive(Deserialize)]
struct NodeInfoResponse {
    default_node_info: DefaultNodeInfo,
}

#[derive(Deserialize)]
struct DefaultNodeInfo {
    network: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    account: BaseAccount,
}

#[derive(Deserialize)]
struct BaseAccount {
    #[serde(rename = "@type", default)]
    type_url: String,
    #[serde(deserialize_with = "de_u64")]
    account_number: u64,
    #[serde(deserialize_with = "de_u64")]
    sequence: u64,
}

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    tx_bytes: &'a str,
    mode: &'static str,
}

#[derive(Deserialize)]
struct BroadcastResponse {
    tx_response: TxResponse,
}

#[derive(Deserialize)]
struct GetTxResponse {
    tx_response: TxResponse,
}

#[derive(Deserialize)]
struct MessageLog {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default, deserialize_with = "de_u64")]
    height: u64,
    txhash: String,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    raw_log: String,
    #[serde(default, deserialize_with = "de_u64")]
    gas_used: u64,
    #[serde(default)]
    logs: Vec<MessageLog>,
    #[serde(default)]
    events: Vec<Event>,
}

impl TxResponse {
    fn into_outcome(self) -> ChainResult<TxOutcome> {
        if self.code != 0 {
            return Err(ChainError::Rejected {
                code: self.code,
                log: self.raw_log,
            });
        }

        // Older SDKs only populate per-message logs, newer ones only top-level events.
        let mut events = self.events;
        events.extend(self.logs.into_iter().flat_map(|log| log.events));

        Ok(TxOutcome {
            tx_hash: self.txhash,
            height: self.height,
            gas_used: self.gas_used,
            events,
        })
    }
}

#[derive(Deserialize)]
struct SmartQueryResponse {
    data: Value,
}

/// LCD client wrapper.
#[derive(Clone)]
pub struct LcdClient {
    http: reqwest::Client,
    /// Endpoint without trailing slash.
    base_url: String,
    /// Configuration.
    config: NetworkConfig,
}

impl LcdClient {
    /// Create a new LCD client.
    ///
    /// No request is made; use [`LcdClient::verify_chain_id`] to check the
    /// endpoint is reachable and serves the expected chain.
    pub fn new(config: NetworkConfig) -> ChainResult<Self> {
        let parsed = url::Url::parse(&config.lcd_url).map_err(|e| ChainError::InvalidEndpoint {
            url: config.lcd_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChainError::InvalidEndpoint {
                url: config.lcd_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ChainError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.lcd_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.as_str() != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id.clone(),
                actual: chain_id.0,
            });
        }

        tracing::info!(
            lcd_url = %self.base_url,
            chain_id = %chain_id,
            "LCD client connected"
        );
        Ok(())
    }

    /// Get the chain ID reported by the node.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        let info: NodeInfoResponse = self
            .get_json("/cosmos/base/tendermint/v1beta1/node_info")
            .await?;
        Ok(ChainId(info.default_node_info.network))
    }

    /// Get account number and sequence for signing.
    pub async fn account(&self, address: &str) -> ChainResult<AccountInfo> {
        let response: AccountResponse = self
            .get_json(&format!("/cosmos/auth/v1beta1/accounts/{}", address))
            .await?;

        let account = response.account;
        tracing::debug!(
            address = %address,
            type_url = %account.type_url,
            account_number = account.account_number,
            sequence = account.sequence,
            "Fetched account"
        );

        Ok(AccountInfo {
            account_number: account.account_number,
            sequence: account.sequence,
        })
    }

    /// Broadcast a signed transaction in sync mode.
    ///
    /// # Returns
    /// The transaction hash once the mempool accepted it
    pub async fn broadcast(&self, tx_bytes: &[u8]) -> ChainResult<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(tx_bytes);
        let request = BroadcastRequest {
            tx_bytes: &encoded,
            mode: "BROADCAST_MODE_SYNC",
        };

        let response: BroadcastResponse = self.post_json("/cosmos/tx/v1beta1/txs", &request).await?;
        let tx = response.tx_response;
        if tx.code != 0 {
            return Err(ChainError::Rejected {
                code: tx.code,
                log: tx.raw_log,
            });
        }

        tracing::debug!(tx_hash = %tx.txhash, "Transaction accepted by mempool");
        Ok(tx.txhash)
    }

    /// Look up a transaction by hash.
    ///
    /// Returns `Ok(None)` while the transaction is not yet indexed.
    pub async fn get_tx(&self, tx_hash: &str) -> ChainResult<Option<TxOutcome>> {
        let url = self.url(&format!("/cosmos/tx/v1beta1/txs/{}", tx_hash));
        let response = self.http.get(&url).send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            if body.contains("not found") {
                return Ok(None);
            }
            return Err(ChainError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GetTxResponse = serde_json::from_str(&body)
            .map_err(|e| ChainError::MalformedResponse(format!("tx {}: {}", tx_hash, e)))?;
        parsed.tx_response.into_outcome().map(Some)
    }

    /// Wait for a transaction to be included in a block.
    pub async fn wait_for_tx(&self, tx_hash: &str) -> ChainResult<TxOutcome> {
        let deadline = Duration::from_secs(self.config.tx_timeout_secs);
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        let result = timeout(deadline, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                match self.get_tx(tx_hash).await? {
                    Some(outcome) => return Ok::<_, ChainError>(outcome),
                    None => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
                }
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::ConfirmationTimeout {
                tx_hash: tx_hash.to_string(),
                secs: self.config.tx_timeout_secs,
            }),
        }
    }

    /// Run a CosmWasm smart query and return the contract's raw JSON answer.
    pub async fn smart_query(&self, contract: &str, msg: &Value) -> ChainResult<Value> {
        let path = smart_query_path(contract, msg)?;
        let response: SmartQueryResponse = self.get_json(&path).await?;
        Ok(response.data)
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> ChainError {
        if e.is_timeout() {
            ChainError::Timeout(self.config.request_timeout_secs)
        } else {
            ChainError::Http(e.to_string())
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ChainResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.decode(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ChainResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(&self, path: &str, response: reqwest::Response) -> ChainResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ChainError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ChainError::MalformedResponse(format!("{}: {}", path, e)))
    }
}

/// Build the LCD path for a smart query. The query JSON travels base64-encoded
/// in the path, so the URL-safe alphabet is used.
pub fn smart_query_path(contract: &str, msg: &Value) -> ChainResult<String> {
    let bytes = serde_json::to_vec(msg).map_err(|e| ChainError::Encoding(e.to_string()))?;
    Ok(format!(
        "/cosmwasm/wasm/v1/contract/{}/smart/{}",
        contract,
        URL_SAFE.encode(bytes)
    ))
}

impl std::fmt::Debug for LcdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcdClient")
            .field("lcd_url", &self.base_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.request_timeout_secs)
            .finish()
    }
}
