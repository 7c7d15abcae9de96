use std::sync::atomic::Ordering;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::ledger::NodeInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub legal_name: String,
    pub total_requests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub nodes: Vec<NodeInfo>,
    pub notaries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultStatus {
    pub states: usize,
    pub snapshot_path: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        legal_name: state.me.to_string(),
        total_requests: state.request_count.load(Ordering::Relaxed),
    })
}

pub async fn get_network(State(state): State<AppState>) -> Json<NetworkStatus> {
    Json(NetworkStatus {
        nodes: state.hub.network_map.party_nodes(),
        notaries: state.hub.network_map.notary_nodes().len(),
    })
}

pub async fn get_vault(State(state): State<AppState>) -> Json<VaultStatus> {
    Json(VaultStatus {
        states: state.hub.vault.len(),
        snapshot_path: state.config.vault.snapshot_path.clone(),
    })
}
