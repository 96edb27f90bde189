use aztec_mcp_server::aztec::{
    models::{EndpointUpdate, TxStatus},
    AztecClient, ClientError,
};
use axum::{extract::State, routing::post, Json, Router};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Notify};

fn client_for(server: &ServerGuard) -> AztecClient {
    AztecClient::new(server.url(), None, "http://127.0.0.1:1")
}

// Not yet registered; callers may add expectations before `create_async`.
fn method_result(server: &mut ServerGuard, method: &str, result: Value) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": method })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string())
}

async fn mock_method(server: &mut ServerGuard, method: &str, result: Value) -> Mock {
    method_result(server, method, result).create_async().await
}

async fn mock_rpc_error(server: &mut ServerGuard, method: &str, message: &str) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": method })))
        .with_status(200)
        .with_body(
            json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32000, "message": message } })
                .to_string(),
        )
        .create_async()
        .await
}

fn node_info() -> Value {
    json!({
        "nodeVersion": "0.87.0",
        "l1ChainId": 31337,
        "protocolVersion": 1,
        "enr": "enr:-abc",
        "rollupVersion": 42
    })
}

#[tokio::test]
async fn test_chain_id_is_derived_from_single_node_info_call() {
    let mut server = Server::new_async().await;
    let mock = method_result(&mut server, "node_getInfo", node_info())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.get_chain_id().await.unwrap(), 31337);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_node_info_keeps_unknown_fields() {
    let mut server = Server::new_async().await;
    let _mock = mock_method(&mut server, "node_getInfo", node_info()).await;

    let info = client_for(&server).get_node_info().await.unwrap();
    assert_eq!(info.node_version, "0.87.0");
    assert_eq!(info.extra.get("rollupVersion"), Some(&json!(42)));
}

#[tokio::test]
async fn test_missing_contract_addresses_default_to_empty_object() {
    let mut server = Server::new_async().await;
    let _mock = mock_method(&mut server, "node_getInfo", node_info()).await;

    let client = client_for(&server);
    let l1 = client.get_l1_contract_addresses().await.unwrap();
    let protocol = client.get_protocol_contract_addresses().await.unwrap();
    assert_eq!(serde_json::to_value(l1).unwrap(), json!({}));
    assert_eq!(serde_json::to_value(protocol).unwrap(), json!({}));
}

#[tokio::test]
async fn test_existence_queries_return_none_on_failure() {
    let mut server = Server::new_async().await;
    let _a = mock_rpc_error(&mut server, "pxe_getRegisteredAccountPublicKey", "unknown account").await;
    let _b = mock_rpc_error(&mut server, "pxe_getContractInstance", "no instance").await;
    let _c = mock_rpc_error(&mut server, "pxe_getAuthWitness", "no witness").await;
    let _d = mock_rpc_error(&mut server, "pxe_getL1ToL2MembershipWitness", "no message").await;

    let client = client_for(&server);
    assert!(client.get_account_public_key("0x01").await.is_none());
    assert!(client.get_contract_instance("0x02").await.is_none());
    assert!(client.get_auth_witness("0x03").await.is_none());
    assert!(client
        .get_l1_to_l2_message_witness("0x04", "0x05", "0x06")
        .await
        .is_none());
}

#[tokio::test]
async fn test_existence_queries_return_none_when_unreachable() {
    let client = AztecClient::new("http://127.0.0.1:1", None, "http://127.0.0.1:1");
    assert!(client.get_account_public_key("0x01").await.is_none());
    assert!(client.get_contract_instance("0x02").await.is_none());
}

#[tokio::test]
async fn test_other_queries_propagate_rpc_errors() {
    let mut server = Server::new_async().await;
    let _mock = mock_rpc_error(&mut server, "aztec_getBlockNumber", "node is syncing").await;

    let err = client_for(&server).get_block_number().await.unwrap_err();
    assert!(matches!(err, ClientError::Rpc { .. }));
    assert!(err.to_string().contains("node is syncing"));
}

#[tokio::test]
async fn test_simulation_failure_is_reported_in_result() {
    let mut server = Server::new_async().await;
    let _mock = mock_rpc_error(&mut server, "pxe_simulateTx", "Assertion failed: balance too low").await;

    let result = client_for(&server)
        .simulate_transaction(json!({"to": "0xc0"}), None)
        .await;
    assert!(!result.success);
    assert!(result.error.unwrap().contains("balance too low"));
    assert!(result.return_values.is_none());
}

#[tokio::test]
async fn test_simulation_success() {
    let mut server = Server::new_async().await;
    let _mock = mock_method(
        &mut server,
        "pxe_simulateTx",
        json!({"returnValues": ["0x2a"], "gasUsed": {"da": 10, "l2": 20}}),
    )
    .await;

    let result = client_for(&server)
        .simulate_transaction(json!({"to": "0xc0"}), None)
        .await;
    assert!(result.success);
    assert_eq!(result.return_values, Some(vec![json!("0x2a")]));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_receipt_status_passes_through() {
    let mut server = Server::new_async().await;
    let _mock = mock_method(
        &mut server,
        "aztec_getTransactionReceipt",
        json!({"status": "app_logic_reverted", "blockNumber": 9}),
    )
    .await;

    let receipt = client_for(&server).get_transaction_receipt("0xabc").await.unwrap();
    assert_eq!(receipt.tx_hash, "0xabc");
    assert_eq!(receipt.status, TxStatus::Other("app_logic_reverted".into()));
    assert_eq!(receipt.block_number, Some(9));
    assert_eq!(
        serde_json::to_value(&receipt).unwrap()["status"],
        json!("app_logic_reverted")
    );
}

#[tokio::test]
async fn test_secret_generation_stops_after_first_failure() {
    let mut server = Server::new_async().await;
    let _generate = mock_rpc_error(&mut server, "pxe_generateSecret", "rng unavailable").await;
    let hash = method_result(&mut server, "pxe_computeSecretHash", json!("0xhash"))
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server).generate_secret_and_hash().await.unwrap_err();
    assert!(err.to_string().contains("rng unavailable"));
    hash.assert_async().await;
}

#[tokio::test]
async fn test_secret_generation_chains_both_calls() {
    let mut server = Server::new_async().await;
    let _generate = mock_method(&mut server, "pxe_generateSecret", json!("0x5ec")).await;
    let _hash = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(
            json!({"method": "pxe_computeSecretHash", "params": ["0x5ec"]}),
        ))
        .with_status(200)
        .with_body(r#"{"jsonrpc":"2.0","id":2,"result":"0xhash"}"#)
        .create_async()
        .await;

    let pair = client_for(&server).generate_secret_and_hash().await.unwrap();
    assert_eq!(pair.secret, "0x5ec");
    assert_eq!(pair.hash, "0xhash");
}

#[tokio::test]
async fn test_health_check_with_both_endpoints_down() {
    let client = AztecClient::new("http://127.0.0.1:1", None, "http://127.0.0.1:1");
    let health = client.health_check().await;
    assert!(!health.is_healthy());
    assert_eq!(
        serde_json::to_value(&health).unwrap(),
        json!({"node": false, "pxe": false})
    );
}

#[tokio::test]
async fn test_health_check_includes_supplementary_fields() {
    let mut server = Server::new_async().await;
    let _info = mock_method(&mut server, "node_getInfo", node_info()).await;
    let _accounts = mock_method(&mut server, "pxe_getRegisteredAccounts", json!(["0x1"])).await;
    let _height = mock_method(&mut server, "aztec_getBlockNumber", json!(12)).await;
    let _sync = mock_method(
        &mut server,
        "pxe_getSyncStatus",
        json!({"blocks": 12, "notes": 3, "syncedToBlock": 12}),
    )
    .await;

    let health = client_for(&server).health_check().await;
    assert!(health.is_healthy());
    assert_eq!(health.block_number, Some(12));
    assert_eq!(health.sync_status.and_then(|s| s.synced_to_block), Some(12));
}

#[tokio::test]
async fn test_node_info_without_protocol_version() {
    let mut server = Server::new_async().await;
    let _info = mock_method(
        &mut server,
        "node_getInfo",
        json!({"nodeVersion": "1.0.0", "l1ChainId": 11155111, "rollupVersion": 1714840162}),
    )
    .await;
    let _accounts = mock_method(&mut server, "pxe_getRegisteredAccounts", json!([])).await;
    let _height = mock_method(&mut server, "aztec_getBlockNumber", json!(3)).await;

    let client = client_for(&server);
    let info = client.get_node_info().await.unwrap();
    assert!(info.protocol_version.is_none());
    assert_eq!(info.extra.get("rollupVersion"), Some(&json!(1714840162)));

    assert_eq!(client.get_chain_id().await.unwrap(), 11155111);
    assert!(matches!(
        client.get_protocol_version().await.unwrap_err(),
        ClientError::Decode(_)
    ));
    assert_eq!(
        serde_json::to_value(client.get_l1_contract_addresses().await.unwrap()).unwrap(),
        json!({})
    );

    let health = client.health_check().await;
    assert!(health.node);
    assert!(health.pxe);
}

#[tokio::test]
async fn test_node_answering_with_unexpected_shape_is_live() {
    let mut server = Server::new_async().await;
    let _info = mock_method(&mut server, "node_getInfo", json!("not an object")).await;

    let client = client_for(&server);
    assert!(client.get_node_info().await.is_err());
    assert!(client.is_node_healthy().await);
}

// Serves both roles. `node_getInfo` is held until the PXE health request arrives, so
// the health check only finishes when both probes are in flight together.
async fn gated_endpoint(
    State(pxe_probed): State<Arc<Notify>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    let result = match request["method"].as_str().unwrap_or_default() {
        "node_getInfo" => {
            pxe_probed.notified().await;
            node_info()
        }
        "pxe_getRegisteredAccounts" => {
            pxe_probed.notify_one();
            json!(["0x1"])
        }
        "aztec_getBlockNumber" => json!(7),
        "pxe_getSyncStatus" => json!({"syncedToBlock": 7}),
        _ => Value::Null,
    };
    Json(json!({"jsonrpc": "2.0", "id": request["id"], "result": result}))
}

#[tokio::test]
async fn test_health_probes_run_concurrently() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let app = Router::new()
        .route("/", post(gated_endpoint))
        .with_state(Arc::new(Notify::new()));
    tokio::spawn(async move { axum::serve(listener, app).await });

    let client = AztecClient::new(url.clone(), Some(url), "http://127.0.0.1:1");
    let health = tokio::time::timeout(Duration::from_secs(5), client.health_check())
        .await
        .expect("node_getInfo waited for a PXE request that was never sent");
    assert!(health.is_healthy());
    assert_eq!(health.block_number, Some(7));
    assert_eq!(health.sync_status.and_then(|s| s.synced_to_block), Some(7));
}

#[tokio::test]
async fn test_node_url_defaults_to_pxe_url() {
    let client = AztecClient::new("http://pxe:8080", None, "http://l1:8545");
    let urls = client.urls();
    assert_eq!(urls.node, "http://pxe:8080");
    assert_eq!(urls.pxe, "http://pxe:8080");
}

#[tokio::test]
async fn test_set_urls_applies_only_present_fields() {
    let client = AztecClient::new("http://pxe:1", Some("http://node:1".into()), "http://l1:1");
    client.set_urls(EndpointUpdate {
        pxe: Some("http://pxe:2".into()),
        node: None,
        l1: Some(String::new()),
    });
    let urls = client.urls();
    assert_eq!(urls.pxe, "http://pxe:2");
    assert_eq!(urls.node, "http://node:1");
    assert_eq!(urls.l1, "http://l1:1");
}

#[tokio::test]
async fn test_set_urls_redirects_later_calls() {
    let mut server = Server::new_async().await;
    let _mock = mock_method(&mut server, "aztec_getBlockNumber", json!(77)).await;

    let client = AztecClient::new("http://127.0.0.1:1", None, "http://127.0.0.1:1");
    assert!(client.get_block_number().await.is_err());

    client.set_urls(EndpointUpdate {
        node: Some(server.url()),
        ..Default::default()
    });
    assert_eq!(client.get_block_number().await.unwrap(), 77);
}
