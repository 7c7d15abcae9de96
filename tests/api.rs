//! Integration tests for the purchase order API.

use std::time::Duration;

use po_node::http::X_REQUEST_ID;
use po_node::ledger::VaultService;
use po_node_client::NodeClient;
use serde_json::Value;

mod common;

use common::{party_entry, seeded_vault, spawn_node, spawn_node_with_vault, test_config, COORDINATOR, ME};

#[tokio::test]
async fn test_whoami_returns_configured_name() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&node.base_url());

    let me = client.me().await.unwrap();
    assert_eq!(me.me, ME);
}

#[tokio::test]
async fn test_peers_exclude_self_and_coordinator() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&node.base_url());

    let peers = client.peers().await.unwrap().peers;
    assert_eq!(peers, vec!["NodeB", "NodeC"]);
    assert!(!peers.iter().any(|p| p == ME || p == COORDINATOR));
}

#[tokio::test]
async fn test_peers_with_custom_coordinator() {
    let mut config = test_config();
    config.node.coordinator_name = "NodeB".to_string();
    let node = spawn_node(config).await;
    let client = NodeClient::new(&node.base_url());

    let peers = client.peers().await.unwrap().peers;
    assert_eq!(peers, vec!["NodeC", "Controller"]);
}

#[tokio::test]
async fn test_purchase_orders_match_vault() {
    let node = spawn_node_with_vault(test_config(), seeded_vault()).await;

    let body: Value = reqwest::get(node.url("/example/purchase-orders"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let expected = serde_json::to_value(node.vault.linear_heads()).unwrap();
    assert_eq!(body, expected);
    assert_eq!(body.as_object().unwrap().len(), 2);

    let entry = body.as_object().unwrap().values().next().unwrap();
    assert!(entry["state"]["data"]["po"].is_object());
    assert!(entry["state"]["notary"]["name"].is_string());
    assert!(entry["ref"]["txhash"].is_string());
}

#[tokio::test]
async fn test_purchase_orders_empty_vault() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&node.base_url());

    assert!(client.purchase_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_returns_proposal_without_recording() {
    let node = spawn_node_with_vault(test_config(), seeded_vault()).await;
    let client = NodeClient::new(&node.base_url());
    let before = node.vault.linear_heads();

    let proposal = client
        .create_purchase_order("NodeB", "{\"ignored\": true}")
        .await
        .unwrap()
        .proposal;

    assert_eq!(proposal["data"]["buyer"]["name"], ME);
    assert_eq!(proposal["data"]["seller"]["name"], "NodeB");
    assert_eq!(proposal["notary"]["name"], COORDINATOR);
    assert_eq!(proposal["data"]["po"]["order_number"], 1);
    assert_eq!(proposal["data"]["po"]["delivery_address"]["city"], "London");
    assert_eq!(proposal["data"]["po"]["delivery_address"]["country"], "UK");
    assert_eq!(proposal["data"]["po"]["items"][0]["name"], "thing");
    assert_eq!(proposal["data"]["po"]["items"][0]["amount"], 4);

    assert_eq!(node.vault.linear_heads(), before);
    assert_eq!(client.purchase_orders().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_status_is_accepted() {
    let node = spawn_node(test_config()).await;

    let res = reqwest::Client::new()
        .put(node.url("/example/NodeC/create-purchase-order"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 202);
}

#[tokio::test]
async fn test_create_unknown_party() {
    let node = spawn_node(test_config()).await;

    let res = reqwest::Client::new()
        .put(node.url("/example/NodeZ/create-purchase-order"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unknown_party");
    assert!(node.vault.is_empty());
}

#[tokio::test]
async fn test_create_without_notary() {
    let mut config = test_config();
    config.network.notaries.clear();
    let node = spawn_node(config).await;
    let client = NodeClient::new(&node.base_url());

    let err = client.create_purchase_order("NodeB", "").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_create_with_ambiguous_notary() {
    let mut config = test_config();
    config.network.notaries.push(party_entry("SecondNotary", 0x02));
    let node = spawn_node(config).await;
    let client = NodeClient::new(&node.base_url());

    let err = client.create_purchase_order("NodeB", "").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_routes_mounted_under_api_prefix() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&format!("{}/api", node.base_url()));

    assert_eq!(client.me().await.unwrap().me, ME);
    assert_eq!(client.peers().await.unwrap().peers, vec!["NodeB", "NodeC"]);
    assert!(client.create_purchase_order("NodeB", "").await.is_ok());
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let node = spawn_node(test_config()).await;
    let client = reqwest::Client::new();

    let res = client.get(node.url("/example/me")).send().await.unwrap();
    assert!(res.headers().contains_key(X_REQUEST_ID));

    let res = client
        .get(node.url("/example/me"))
        .header(X_REQUEST_ID, "test-id-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[X_REQUEST_ID], "test-id-42");
}

#[tokio::test]
async fn test_health() {
    let node = spawn_node(test_config()).await;

    let body: Value = reqwest::get(node.url("/health")).await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_network_reload_updates_peers() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&node.base_url());

    let mut config = test_config();
    config.network.parties.push(party_entry("NodeD", 0xdd));
    node.config_tx.send(config).unwrap();

    let mut peers = Vec::new();
    for _ in 0..50 {
        peers = client.peers().await.unwrap().peers;
        if peers.len() == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(peers, vec!["NodeB", "NodeC", "NodeD"]);

    // New parties resolve for create as well.
    assert!(client.create_purchase_order("NodeD", "").await.is_ok());
}

#[tokio::test]
async fn test_network_reload_removes_party() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&node.base_url());
    assert!(client.create_purchase_order("NodeC", "").await.is_ok());

    let mut config = test_config();
    config.network.parties.retain(|p| p.name != "NodeC");
    node.config_tx.send(config).unwrap();

    let mut peers = Vec::new();
    for _ in 0..50 {
        peers = client.peers().await.unwrap().peers;
        if peers.len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(peers, vec!["NodeB"]);

    let err = client.create_purchase_order("NodeC", "").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(client.create_purchase_order("NodeB", "").await.is_ok());
}

#[tokio::test]
async fn test_invalid_network_reload_is_ignored() {
    let node = spawn_node(test_config()).await;
    let client = NodeClient::new(&node.base_url());

    let mut config = test_config();
    config.network.parties.push(party_entry("NodeB", 0xbe));
    node.config_tx.send(config).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(client.peers().await.unwrap().peers, vec!["NodeB", "NodeC"]);
}
