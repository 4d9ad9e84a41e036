//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use token_deploy::chain::{ChainError, ChainResult};
use token_deploy::gateway::{ContractGateway, InstantiateResponse, UploadResponse};

pub const SIGNER: &str = "terra1signer";

// Well-known BIP-39 test vector, never holds funds.
pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Fresh directory under the system temp dir.
pub fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("token-deploy-{}-{}", tag, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// How the mock gateway misbehaves.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    pub reject_upload: bool,
    /// Instantiate succeeds on chain but the address attribute is missing.
    pub drop_contract_address: bool,
    /// Replace the `balance` query answer.
    pub balance_response: Option<Value>,
    /// Replace the `token_info` query answer.
    pub token_info_response: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    next_code_id: u64,
    instances: HashMap<String, Value>,
    calls: Vec<String>,
    instantiate_msgs: Vec<Value>,
    admins: Vec<Option<String>>,
    labels: Vec<String>,
}

/// In-memory CW20 chain: uploads mint code IDs, instantiates record their
/// init message, and queries answer from it.
#[derive(Debug)]
pub struct MockGateway {
    sender: String,
    faults: Faults,
    state: Mutex<MockState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_faults(Faults::default())
    }

    pub fn with_faults(faults: Faults) -> Self {
        Self {
            sender: SIGNER.to_string(),
            faults,
            state: Mutex::new(MockState {
                next_code_id: 1,
                ..Default::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn instantiate_msgs(&self) -> Vec<Value> {
        self.state.lock().unwrap().instantiate_msgs.clone()
    }

    pub fn admins(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().admins.clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.state.lock().unwrap().labels.clone()
    }
}

#[async_trait]
impl ContractGateway for MockGateway {
    fn sender(&self) -> &str {
        &self.sender
    }

    async fn upload(&self, path: &Path) -> ChainResult<UploadResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("upload".to_string());

        if self.faults.reject_upload {
            return Err(ChainError::Rejected {
                code: 5,
                log: format!("insufficient funds to store {}", path.display()),
            });
        }

        let code_id = state.next_code_id;
        state.next_code_id += 1;
        Ok(UploadResponse {
            code_id,
            tx_hash: format!("UPLOAD{}", code_id),
        })
    }

    async fn instantiate(
        &self,
        admin: Option<&str>,
        code_id: u64,
        msg: &Value,
        label: &str,
    ) -> ChainResult<InstantiateResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("instantiate".to_string());
        state.instantiate_msgs.push(msg.clone());
        state.admins.push(admin.map(str::to_string));
        state.labels.push(label.to_string());

        if self.faults.drop_contract_address {
            return Err(ChainError::MissingEventAttribute {
                event: "instantiate".to_string(),
                attribute: "_contract_address".to_string(),
            });
        }

        let address = format!("terra1contract{}x{}", code_id, state.instances.len());
        state.instances.insert(address.clone(), msg.clone());
        Ok(InstantiateResponse {
            contract_address: address,
            tx_hash: format!("INSTANTIATE{}", state.instances.len()),
        })
    }

    async fn query(&self, contract: &str, msg: &Value) -> ChainResult<Value> {
        let mut state = self.state.lock().unwrap();
        let kind = msg
            .as_object()
            .and_then(|o| o.keys().next().cloned())
            .unwrap_or_default();
        state.calls.push(format!("query:{}", kind));

        let init = state.instances.get(contract).cloned().ok_or_else(|| ChainError::Status {
            status: 500,
            body: format!("no contract {}", contract),
        })?;
        let balances = init["initial_balances"].as_array().cloned().unwrap_or_default();

        let answer = match kind.as_str() {
            "token_info" => self.faults.token_info_response.clone().unwrap_or_else(|| {
                let total: u128 = balances
                    .iter()
                    .filter_map(|b| b["amount"].as_str()?.parse::<u128>().ok())
                    .sum();
                json!({
                    "name": init["name"],
                    "symbol": init["symbol"],
                    "decimals": init["decimals"],
                    "total_supply": total.to_string(),
                })
            }),
            "minter" => init.get("mint").cloned().unwrap_or(Value::Null),
            "balance" => self.faults.balance_response.clone().unwrap_or_else(|| {
                let address = &msg["balance"]["address"];
                let amount = balances
                    .iter()
                    .find(|b| &b["address"] == address)
                    .map(|b| b["amount"].clone())
                    .unwrap_or_else(|| json!("0"));
                json!({ "balance": amount })
            }),
            other => {
                return Err(ChainError::Status {
                    status: 400,
                    body: format!("unknown query {}", other),
                })
            }
        };
        Ok(answer)
    }
}

/// A request seen by the mock LCD.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Start a programmable LCD on an ephemeral port.
///
/// `route` maps (method, path) to (status, JSON body).
pub async fn start_mock_lcd<F>(route: F) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>)
where
    F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let route = Arc::new(route);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_task = seen.clone();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let route = route.clone();
            let seen = seen_task.clone();

            tokio::spawn(async move {
                let request = match read_request(&mut socket).await {
                    Some(request) => request,
                    None => return,
                };
                let (status, body) = route(&request.method, &request.path);
                seen.lock().unwrap().push(request);

                let reason = match status {
                    200 => "OK",
                    400 => "Bad Request",
                    404 => "Not Found",
                    _ => "Internal Server Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, seen)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    Some(RecordedRequest { method, path, body })
}
