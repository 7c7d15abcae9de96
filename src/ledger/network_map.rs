//! Network map cache: the node's view of the other participants.
//!
//! # Design Decisions
//! - The directory is an immutable snapshot swapped atomically on reload
//! - `party_nodes` lists every node, notaries included, as the host directory does
//! - The identity service resolves exactly the names in the current snapshot

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::ledger::identity::{IdentityService, Party};
use crate::ledger::types::{LedgerError, LedgerResult};
use crate::observability::metrics;

/// Services a node can advertise in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    ValidatingNotary,
}

/// Directory entry for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub legal_identity: Party,
    #[serde(default)]
    pub advertised_services: Vec<ServiceType>,
}

impl NodeInfo {
    pub fn new(legal_identity: Party) -> Self {
        Self {
            legal_identity,
            advertised_services: Vec::new(),
        }
    }

    pub fn notary(legal_identity: Party) -> Self {
        Self {
            legal_identity,
            advertised_services: vec![ServiceType::ValidatingNotary],
        }
    }

    pub fn is_notary(&self) -> bool {
        self.advertised_services.contains(&ServiceType::ValidatingNotary)
    }
}

/// Point-in-time contents of the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSnapshot {
    nodes: Vec<NodeInfo>,
}

impl NetworkSnapshot {
    pub fn new(nodes: Vec<NodeInfo>) -> Self {
        Self { nodes }
    }

    /// Build a snapshot from configuration, always including `me`.
    ///
    /// A configured entry carrying our own legal name is replaced by `me`
    /// so the directory agrees with the key the node actually holds.
    pub fn from_config(network: &NetworkConfig, me: &NodeInfo) -> LedgerResult<Self> {
        let me_is_notary = network.notaries.iter().any(|n| n.name == me.legal_identity.name);
        let mut nodes = vec![if me_is_notary {
            NodeInfo::notary(me.legal_identity.clone())
        } else {
            me.clone()
        }];

        let entries = network
            .parties
            .iter()
            .map(|c| (c, false))
            .chain(network.notaries.iter().map(|c| (c, true)));

        for (config, notary) in entries {
            let party = Party::try_from(config)?;
            if party.name == me.legal_identity.name {
                if party.owning_key != me.legal_identity.owning_key {
                    tracing::warn!(
                        party = %party.name,
                        configured_key = %party.owning_key,
                        node_key = %me.legal_identity.owning_key,
                        "Configured key for this node differs from its legal identity key"
                    );
                }
                continue;
            }
            nodes.push(if notary { NodeInfo::notary(party) } else { NodeInfo::new(party) });
        }

        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[NodeInfo] {
        &self.nodes
    }
}

/// Host-maintained directory of network participants.
pub trait NetworkMapCache: Send + Sync {
    /// Every node in the directory.
    fn party_nodes(&self) -> Vec<NodeInfo>;

    /// Nodes advertising a notary service.
    fn notary_nodes(&self) -> Vec<NodeInfo>;

    /// Swap in a new directory.
    fn replace_snapshot(&self, snapshot: NetworkSnapshot);

    /// The one notary in the directory.
    fn single_notary(&self) -> LedgerResult<Party> {
        let mut notaries = self.notary_nodes();
        match notaries.len() {
            0 => Err(LedgerError::NotaryNotFound),
            1 => Ok(notaries.remove(0).legal_identity),
            n => Err(LedgerError::AmbiguousNotary(n)),
        }
    }
}

/// In-process network map seeded from configuration.
pub struct InMemoryNetworkMap {
    snapshot: ArcSwap<NetworkSnapshot>,
    identity: Arc<dyn IdentityService>,
}

impl InMemoryNetworkMap {
    pub fn new(snapshot: NetworkSnapshot, identity: Arc<dyn IdentityService>) -> Self {
        register_all(identity.as_ref(), &snapshot);
        metrics::record_network_size(snapshot.nodes.len());
        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
            identity,
        }
    }
}

impl std::fmt::Debug for InMemoryNetworkMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNetworkMap")
            .field("nodes", &self.snapshot.load().nodes.len())
            .finish()
    }
}

fn register_all(identity: &dyn IdentityService, snapshot: &NetworkSnapshot) {
    identity.replace_all(snapshot.nodes.iter().map(|n| n.legal_identity.clone()).collect());
}

impl NetworkMapCache for InMemoryNetworkMap {
    fn party_nodes(&self) -> Vec<NodeInfo> {
        self.snapshot.load().nodes.clone()
    }

    fn notary_nodes(&self) -> Vec<NodeInfo> {
        self.snapshot
            .load()
            .nodes
            .iter()
            .filter(|n| n.is_notary())
            .cloned()
            .collect()
    }

    fn replace_snapshot(&self, snapshot: NetworkSnapshot) {
        register_all(self.identity.as_ref(), &snapshot);
        metrics::record_network_size(snapshot.nodes.len());
        tracing::info!(nodes = snapshot.nodes.len(), "Network map updated");
        self.snapshot.store(Arc::new(snapshot));
    }
}
