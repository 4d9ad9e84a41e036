//! CosmWasm gateway tests against a mock LCD endpoint.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::json;

use token_deploy::chain::{self, ChainError, LcdClient, Wallet};
use token_deploy::config::NetworkConfig;
use token_deploy::gateway::{ContractGateway, CosmWasmGateway};

mod common;

use common::TEST_MNEMONIC;

const TERRA_PATH: &str = "m/44'/330'/0'/0/0";

fn network(addr: SocketAddr) -> NetworkConfig {
    NetworkConfig {
        lcd_url: format!("http://{}", addr),
        chain_id: "localterra".to_string(),
        request_timeout_secs: 5,
        tx_timeout_secs: 5,
        poll_interval_ms: 20,
        ..NetworkConfig::default()
    }
}

fn wallet() -> Wallet {
    Wallet::from_mnemonic(TEST_MNEMONIC, TERRA_PATH, "terra").unwrap()
}

fn node_info(network: &str) -> (u16, String) {
    (
        200,
        json!({ "default_node_info": { "network": network, "version": "0.37.2" } }).to_string(),
    )
}

fn account() -> (u16, String) {
    (
        200,
        json!({
            "account": {
                "@type": "/cosmos.auth.v1beta1.BaseAccount",
                "pub_key": null,
                "account_number": "7",
                "sequence": "3"
            }
        })
        .to_string(),
    )
}

fn broadcast_ok(hash: &str) -> (u16, String) {
    (
        200,
        json!({ "tx_response": { "height": "0", "txhash": hash, "code": 0, "raw_log": "" } }).to_string(),
    )
}

fn included(hash: &str, event: &str, attributes: serde_json::Value) -> (u16, String) {
    (
        200,
        json!({
            "tx": {},
            "tx_response": {
                "height": "12",
                "txhash": hash,
                "code": 0,
                "gas_used": "123456",
                "events": [
                    { "type": "message", "attributes": [{ "key": "module", "value": "wasm" }] },
                    { "type": event, "attributes": attributes }
                ]
            }
        })
        .to_string(),
    )
}

fn not_found() -> (u16, String) {
    (
        404,
        json!({ "code": 5, "message": "tx not found", "details": [] }).to_string(),
    )
}

fn wasm_file() -> std::path::PathBuf {
    let dir = common::temp_dir("wasm");
    let path = dir.join("astroport_token.wasm");
    fs::write(&path, b"\0asm\x01\0\0\0").unwrap();
    path
}

#[tokio::test]
async fn test_connect_verifies_chain_id() {
    let (addr, _) = common::start_mock_lcd(|_, path| match path {
        "/cosmos/base/tendermint/v1beta1/node_info" => node_info("localterra"),
        _ => not_found(),
    })
    .await;

    let tx = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap();
    assert!(tx.wallet().address().starts_with("terra1"));
}

#[tokio::test]
async fn test_connect_rejects_other_chain() {
    let (addr, _) = common::start_mock_lcd(|_, _| node_info("phoenix-1")).await;

    let err = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap_err();
    match err {
        ChainError::ChainMismatch { expected, actual } => {
            assert_eq!(expected, "localterra");
            assert_eq!(actual, "phoenix-1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_connect_fails_when_unreachable() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap_err();
    assert!(matches!(err, ChainError::Http(_)));
}

#[tokio::test]
async fn test_smart_query_returns_data() {
    let (addr, seen) = common::start_mock_lcd(|_, path| {
        if path.starts_with("/cosmwasm/wasm/v1/contract/terra1c/smart/") {
            (200, json!({ "data": { "balance": "5" } }).to_string())
        } else {
            not_found()
        }
    })
    .await;

    let client = LcdClient::new(network(addr)).unwrap();
    let data = client
        .smart_query("terra1c", &json!({ "balance": { "address": "terra1x" } }))
        .await
        .unwrap();

    assert_eq!(data, json!({ "balance": "5" }));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "GET");
    // {"balance":{"address":"terra1x"}}
    assert!(seen[0]
        .path
        .ends_with("/smart/eyJiYWxhbmNlIjp7ImFkZHJlc3MiOiJ0ZXJyYTF4In19"));
}

#[tokio::test]
async fn test_smart_query_error_status() {
    let (addr, _) = common::start_mock_lcd(|_, _| {
        (
            500,
            json!({ "code": 2, "message": "query wasm contract failed: unknown variant" }).to_string(),
        )
    })
    .await;

    let client = LcdClient::new(network(addr)).unwrap();
    let err = client
        .smart_query("terra1c", &json!({ "nope": {} }))
        .await
        .unwrap_err();
    assert!(matches!(err, ChainError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_upload_reads_code_id_from_events() {
    let (addr, seen) = common::start_mock_lcd(|method, path| match (method, path) {
        (_, "/cosmos/base/tendermint/v1beta1/node_info") => node_info("localterra"),
        (_, p) if p.starts_with("/cosmos/auth/v1beta1/accounts/") => account(),
        ("POST", "/cosmos/tx/v1beta1/txs") => broadcast_ok("STOREHASH"),
        ("GET", "/cosmos/tx/v1beta1/txs/STOREHASH") => included(
            "STOREHASH",
            "store_code",
            json!([{ "key": "code_id", "value": "17", "index": true }]),
        ),
        _ => not_found(),
    })
    .await;

    let tx = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap();
    let gateway = CosmWasmGateway::new(tx);

    let upload = gateway.upload(&wasm_file()).await.unwrap();
    assert_eq!(upload.code_id, 17);
    assert_eq!(upload.tx_hash, "STOREHASH");

    let seen = seen.lock().unwrap();
    let broadcast = seen
        .iter()
        .find(|r| r.method == "POST")
        .expect("broadcast request");
    let body: serde_json::Value = serde_json::from_str(&broadcast.body).unwrap();
    assert_eq!(body["mode"], "BROADCAST_MODE_SYNC");
    assert!(!body["tx_bytes"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_instantiate_reads_address_by_name() {
    let contract = Wallet::from_mnemonic(TEST_MNEMONIC, "m/44'/330'/0'/0/1", "terra")
        .unwrap()
        .address();
    let event_contract = contract.clone();

    let (addr, _) = common::start_mock_lcd(move |method, path| match (method, path) {
        (_, "/cosmos/base/tendermint/v1beta1/node_info") => node_info("localterra"),
        (_, p) if p.starts_with("/cosmos/auth/v1beta1/accounts/") => account(),
        ("POST", "/cosmos/tx/v1beta1/txs") => broadcast_ok("INSTHASH"),
        ("GET", "/cosmos/tx/v1beta1/txs/INSTHASH") => included(
            "INSTHASH",
            "instantiate",
            json!([
                { "key": "code_id", "value": "17" },
                { "key": "_contract_address", "value": event_contract }
            ]),
        ),
        _ => not_found(),
    })
    .await;

    let tx = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap();
    let gateway = CosmWasmGateway::new(tx);
    let admin = gateway.sender().to_string();

    let response = gateway
        .instantiate(Some(&admin), 17, &json!({ "name": "Astroport" }), "Astroport Token")
        .await
        .unwrap();
    assert_eq!(response.contract_address, contract);
    assert_eq!(response.tx_hash, "INSTHASH");
}

#[tokio::test]
async fn test_instantiate_without_address_attribute() {
    let (addr, _) = common::start_mock_lcd(|method, path| match (method, path) {
        (_, "/cosmos/base/tendermint/v1beta1/node_info") => node_info("localterra"),
        (_, p) if p.starts_with("/cosmos/auth/v1beta1/accounts/") => account(),
        ("POST", "/cosmos/tx/v1beta1/txs") => broadcast_ok("INSTHASH"),
        ("GET", "/cosmos/tx/v1beta1/txs/INSTHASH") => included(
            "INSTHASH",
            "instantiate",
            json!([{ "key": "code_id", "value": "17" }]),
        ),
        _ => not_found(),
    })
    .await;

    let tx = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap();
    let gateway = CosmWasmGateway::new(tx);

    let err = gateway
        .instantiate(None, 17, &json!({}), "Astroport Token")
        .await
        .unwrap_err();
    match err {
        ChainError::MissingEventAttribute { event, attribute } => {
            assert_eq!(event, "instantiate");
            assert_eq!(attribute, "_contract_address");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_broadcast_rejection_surfaces_code() {
    let (addr, _) = common::start_mock_lcd(|method, path| match (method, path) {
        (_, "/cosmos/base/tendermint/v1beta1/node_info") => node_info("localterra"),
        (_, p) if p.starts_with("/cosmos/auth/v1beta1/accounts/") => account(),
        ("POST", "/cosmos/tx/v1beta1/txs") => (
            200,
            json!({
                "tx_response": {
                    "height": "0",
                    "txhash": "BAD",
                    "code": 13,
                    "raw_log": "insufficient fees"
                }
            })
            .to_string(),
        ),
        _ => not_found(),
    })
    .await;

    let tx = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap();
    let gateway = CosmWasmGateway::new(tx);

    let err = gateway.upload(&wasm_file()).await.unwrap_err();
    match err {
        ChainError::Rejected { code, log } => {
            assert_eq!(code, 13);
            assert_eq!(log, "insufficient fees");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_wait_for_tx_polls_until_included() {
    let lookups = Arc::new(AtomicU32::new(0));
    let counter = lookups.clone();

    let (addr, _) = common::start_mock_lcd(move |_, path| {
        if path == "/cosmos/tx/v1beta1/txs/SLOW" {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                not_found()
            } else {
                included("SLOW", "store_code", json!([{ "key": "code_id", "value": "1" }]))
            }
        } else {
            not_found()
        }
    })
    .await;

    let client = LcdClient::new(network(addr)).unwrap();
    let outcome = client.wait_for_tx("SLOW").await.unwrap();

    assert_eq!(outcome.height, 12);
    assert_eq!(lookups.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_wait_for_tx_times_out() {
    let (addr, _) = common::start_mock_lcd(|_, _| not_found()).await;

    let mut config = network(addr);
    config.tx_timeout_secs = 1;
    config.poll_interval_ms = 100;
    let client = LcdClient::new(config).unwrap();

    let err = client.wait_for_tx("NEVER").await.unwrap_err();
    assert!(matches!(
        err,
        ChainError::ConfirmationTimeout { secs: 1, .. }
    ));
}

#[tokio::test]
async fn test_upload_missing_bytecode() {
    let (addr, seen) = common::start_mock_lcd(|_, _| node_info("localterra")).await;

    let tx = chain::connect_with_wallet(&network(addr), wallet()).await.unwrap();
    let gateway = CosmWasmGateway::new(tx);

    let err = gateway
        .upload(Path::new("/definitely/not/astroport_token.wasm"))
        .await
        .unwrap_err();
    assert!(matches!(err, ChainError::Bytecode { .. }));
    // Only the node_info handshake reached the LCD.
    assert_eq!(seen.lock().unwrap().len(), 1);
}
