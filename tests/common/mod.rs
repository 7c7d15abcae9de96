//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, B256};
use chrono::{Duration as ChronoDuration, Utc};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use po_node::config::{NodeConfig, PartyConfig};
use po_node::contract::{Address as DeliveryAddress, Item, PurchaseOrder, PurchaseOrderContract, PurchaseOrderState};
use po_node::http::HttpServer;
use po_node::ledger::{
    IdentityService, InMemoryIdentityService, InMemoryNetworkMap, InMemoryVault, NetworkMapCache,
    NetworkSnapshot, NodeInfo, Party, ServiceHub, StateAndRef, StateRef, TransactionState, VaultService,
};
use po_node::lifecycle::Shutdown;

pub const ME: &str = "NodeA";
pub const COORDINATOR: &str = "Controller";

pub fn party_entry(name: &str, byte: u8) -> PartyConfig {
    PartyConfig {
        name: name.to_string(),
        owning_key: Address::repeat_byte(byte).to_string(),
    }
}

/// NodeA with peers NodeB and NodeC, and the coordinator acting as notary.
pub fn test_config() -> NodeConfig {
    let mut config = NodeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.node.legal_name = ME.to_string();
    config.node.coordinator_name = COORDINATOR.to_string();
    config.network.parties = vec![party_entry("NodeB", 0xbb), party_entry("NodeC", 0xcc)];
    config.network.notaries = vec![party_entry(COORDINATOR, 0x01)];
    config
}

/// A running node bound to an ephemeral port.
pub struct TestNode {
    pub addr: SocketAddr,
    pub hub: ServiceHub,
    pub vault: InMemoryVault,
    pub shutdown: Shutdown,
    pub config_tx: mpsc::UnboundedSender<NodeConfig>,
}

impl TestNode {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestNode {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_node(config: NodeConfig) -> TestNode {
    spawn_node_with_vault(config, InMemoryVault::new(None)).await
}

pub async fn spawn_node_with_vault(config: NodeConfig, vault: InMemoryVault) -> TestNode {
    let me = NodeInfo::new(Party::new(config.node.legal_name.clone(), Address::repeat_byte(0xaa)));
    let identity: Arc<dyn IdentityService> = Arc::new(InMemoryIdentityService::new());
    let snapshot = NetworkSnapshot::from_config(&config.network, &me).unwrap();
    let network_map: Arc<dyn NetworkMapCache> = Arc::new(InMemoryNetworkMap::new(snapshot, identity.clone()));
    let hub = ServiceHub::new(me, identity, network_map, Arc::new(vault.clone()));

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config, hub.clone());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });
    wait_until_ready(addr).await;

    TestNode {
        addr,
        hub,
        vault,
        shutdown,
        config_tx,
    }
}

async fn wait_until_ready(addr: SocketAddr) {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client.get(format!("http://{}/health", addr)).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("node at {} did not become ready", addr);
}

/// A recorded purchase order between `buyer` and `seller`.
pub fn recorded_order(buyer: Party, seller: Party, notary: Party, order_number: i32) -> StateAndRef<PurchaseOrderState> {
    let po = PurchaseOrder::new(
        order_number,
        Utc::now() + ChronoDuration::days(7),
        DeliveryAddress::new("London", "UK"),
        vec![Item::new("widget", 3)],
    );
    let state = PurchaseOrderState::new(po, buyer, seller, PurchaseOrderContract::default());
    StateAndRef {
        state: TransactionState::new(state, notary),
        state_ref: StateRef {
            txhash: B256::repeat_byte(order_number as u8),
            index: 0,
        },
    }
}

/// A vault holding two purchase orders placed by NodeA.
pub fn seeded_vault() -> InMemoryVault {
    let vault = InMemoryVault::new(None);
    let me = Party::new(ME, Address::repeat_byte(0xaa));
    let notary = Party::new(COORDINATOR, Address::repeat_byte(0x01));
    vault.record(recorded_order(me.clone(), Party::new("NodeB", Address::repeat_byte(0xbb)), notary.clone(), 1));
    vault.record(recorded_order(me, Party::new("NodeC", Address::repeat_byte(0xcc)), notary, 2));
    vault
}
