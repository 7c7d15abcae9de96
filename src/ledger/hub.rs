//! Bundle of host services handed to the API handlers.

use std::sync::Arc;

use crate::config::NodeConfig;
use crate::ledger::identity::{IdentityService, InMemoryIdentityService, Party};
use crate::ledger::keys::NodeKey;
use crate::ledger::network_map::{InMemoryNetworkMap, NetworkMapCache, NetworkSnapshot, NodeInfo};
use crate::ledger::types::LedgerResult;
use crate::ledger::vault::{InMemoryVault, VaultService};

/// Host services available to locally running applications.
#[derive(Clone)]
pub struct ServiceHub {
    pub my_info: NodeInfo,
    pub identity: Arc<dyn IdentityService>,
    pub network_map: Arc<dyn NetworkMapCache>,
    pub vault: Arc<dyn VaultService>,
}

impl ServiceHub {
    pub fn new(
        my_info: NodeInfo,
        identity: Arc<dyn IdentityService>,
        network_map: Arc<dyn NetworkMapCache>,
        vault: Arc<dyn VaultService>,
    ) -> Self {
        Self {
            my_info,
            identity,
            network_map,
            vault,
        }
    }

    /// Wire in-process services from configuration.
    ///
    /// Returns the concrete vault as well so the caller can persist it on shutdown.
    pub fn from_config(config: &NodeConfig, key: &NodeKey) -> LedgerResult<(Self, InMemoryVault)> {
        let me = NodeInfo::new(Party::new(config.node.legal_name.clone(), key.address()));

        let identity: Arc<dyn IdentityService> = Arc::new(InMemoryIdentityService::new());
        let snapshot = NetworkSnapshot::from_config(&config.network, &me)?;
        let network_map: Arc<dyn NetworkMapCache> =
            Arc::new(InMemoryNetworkMap::new(snapshot, identity.clone()));

        let vault = match &config.vault.snapshot_path {
            Some(path) => InMemoryVault::load_from_file(path)?,
            None => InMemoryVault::new(None),
        };

        tracing::info!(
            legal_name = %me.legal_identity.name,
            owning_key = %me.legal_identity.owning_key,
            nodes = network_map.party_nodes().len(),
            vault_states = vault.len(),
            "Service hub ready"
        );

        let hub = Self::new(me, identity, network_map, Arc::new(vault.clone()));
        Ok((hub, vault))
    }

    /// Legal identity of this node.
    pub fn me(&self) -> &Party {
        &self.my_info.legal_identity
    }
}

impl std::fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHub")
            .field("me", &self.my_info.legal_identity.name)
            .field("vault_states", &self.vault.len())
            .finish()
    }
}
