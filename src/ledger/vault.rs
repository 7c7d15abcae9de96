//! Vault: the node's local store of purchase order states.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;

use crate::contract::state::{PurchaseOrderState, UniqueIdentifier};
use crate::ledger::transaction::StateAndRef;
use crate::ledger::types::LedgerResult;
use crate::observability::metrics;

/// Read/record access to ledger states visible to this node.
pub trait VaultService: Send + Sync {
    /// Latest version of every linear state, keyed by linear id.
    fn linear_heads(&self) -> BTreeMap<UniqueIdentifier, StateAndRef<PurchaseOrderState>>;

    /// Record a new head, superseding any earlier version with the same linear id.
    fn record(&self, state: StateAndRef<PurchaseOrderState>);

    /// Number of linear heads held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A thread-safe in-process vault with optional JSON persistence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVault {
    inner: Arc<DashMap<UniqueIdentifier, StateAndRef<PurchaseOrderState>>>,
    persistence_path: Option<String>,
}

impl InMemoryVault {
    /// Create a new empty vault.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from file if it exists; the file is written back by [`save_to_file`](Self::save_to_file).
    pub fn load_from_file(path: &str) -> LedgerResult<Self> {
        let vault = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let states: Vec<StateAndRef<PurchaseOrderState>> = serde_json::from_reader(reader)?;

            for state in states {
                vault.inner.insert(state.state.data.linear_id.clone(), state);
            }
            metrics::record_vault_size(vault.inner.len());
            tracing::info!(path = %path, states = vault.inner.len(), "Loaded vault snapshot");
        }
        Ok(vault)
    }

    /// Save to file, if a persistence path was configured.
    pub fn save_to_file(&self) -> LedgerResult<()> {
        if let Some(path) = &self.persistence_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);

            let states: Vec<_> = self.linear_heads().into_values().collect();
            serde_json::to_writer_pretty(writer, &states)?;
            tracing::info!(path = %path, states = states.len(), "Saved vault snapshot");
        }
        Ok(())
    }
}

impl VaultService for InMemoryVault {
    fn linear_heads(&self) -> BTreeMap<UniqueIdentifier, StateAndRef<PurchaseOrderState>> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    fn record(&self, state: StateAndRef<PurchaseOrderState>) {
        tracing::debug!(
            linear_id = %state.state.data.linear_id,
            state_ref = %state.state_ref,
            "Recording state"
        );
        self.inner.insert(state.state.data.linear_id.clone(), state);
        metrics::record_vault_size(self.inner.len());
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
