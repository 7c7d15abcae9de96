//! Purchase order API handlers.
//!
//! Every handler reads from the [`ServiceHub`](crate::ledger::ServiceHub) held
//! in [`AppState`]. None of them write to the ledger.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::contract::{PurchaseOrder, PurchaseOrderContract, PurchaseOrderState, UniqueIdentifier};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::ledger::{LedgerError, NodeInfo, StateAndRef, TransactionState};
use crate::observability::metrics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    pub me: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peers {
    pub peers: Vec<String>,
}

/// A purchase order wrapped with its notary, ready to be built into a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal: TransactionState<PurchaseOrderState>,
}

pub type PurchaseOrders = BTreeMap<UniqueIdentifier, StateAndRef<PurchaseOrderState>>;

/// `GET /example/me`
pub async fn whoami(State(state): State<AppState>) -> Json<WhoAmI> {
    Json(WhoAmI {
        me: state.me.to_string(),
    })
}

/// `GET /example/peers`
pub async fn get_peers(State(state): State<AppState>) -> Json<Peers> {
    let nodes = state.hub.network_map.party_nodes();
    Json(Peers {
        peers: peer_names(&nodes, &state.me, &state.coordinator_name),
    })
}

/// Legal names of `nodes`, leaving out this node and the coordinator.
pub fn peer_names(nodes: &[NodeInfo], me: &str, coordinator: &str) -> Vec<String> {
    nodes
        .iter()
        .map(|n| n.legal_identity.name.as_str())
        .filter(|name| *name != me && *name != coordinator)
        .map(str::to_string)
        .collect()
}

/// `GET /example/purchase-orders`
pub async fn get_purchase_orders(State(state): State<AppState>) -> Json<PurchaseOrders> {
    Json(state.hub.vault.linear_heads())
}

/// `PUT /example/{party}/create-purchase-order`
///
/// The body is read and discarded. The proposal always carries the
/// placeholder order and is never signed, sent or recorded.
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Path(party): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Proposal>), ApiError> {
    tracing::debug!(party = %party, body_len = body.len(), "Create purchase order");

    let seller = state
        .hub
        .identity
        .party_from_name(&party)
        .ok_or_else(|| LedgerError::UnknownParty(party.clone()))?;
    let notary = state.hub.network_map.single_notary()?;

    let po_state = PurchaseOrderState::new(
        PurchaseOrder::placeholder(Utc::now()),
        state.hub.me().clone(),
        seller,
        PurchaseOrderContract::default(),
    );

    tracing::info!(
        seller = %party,
        notary = %notary.name,
        linear_id = %po_state.linear_id,
        "Purchase order proposal built"
    );
    metrics::record_proposal();

    Ok((
        StatusCode::ACCEPTED,
        Json(Proposal {
            proposal: TransactionState::new(po_state, notary),
        }),
    ))
}
