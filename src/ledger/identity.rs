//! Identity service: name → party resolution.

use std::collections::HashSet;
use std::sync::Arc;

use alloy::primitives::Address;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::config::PartyConfig;
use crate::ledger::types::{LedgerError, LedgerResult};

/// A name-identified network participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub owning_key: Address,
}

impl Party {
    pub fn new(name: impl Into<String>, owning_key: Address) -> Self {
        Self {
            name: name.into(),
            owning_key,
        }
    }
}

impl TryFrom<&PartyConfig> for Party {
    type Error = LedgerError;

    fn try_from(config: &PartyConfig) -> LedgerResult<Self> {
        let owning_key = config.owning_key.parse().map_err(|_| LedgerError::InvalidKey {
            party: config.name.clone(),
            key: config.owning_key.clone(),
        })?;
        Ok(Self::new(config.name.clone(), owning_key))
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolves legal names to parties.
pub trait IdentityService: Send + Sync {
    /// Look up a party by exact legal name.
    fn party_from_name(&self, name: &str) -> Option<Party>;

    /// Make a party resolvable. Re-registering a name replaces its key.
    fn register(&self, party: Party);

    /// All known parties, in no particular order.
    fn parties(&self) -> Vec<Party>;

    /// Make exactly `parties` resolvable, forgetting every other name.
    fn replace_all(&self, parties: Vec<Party>);
}

/// Thread-safe in-process identity directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityService {
    inner: Arc<DashMap<String, Party>>,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityService for InMemoryIdentityService {
    fn party_from_name(&self, name: &str) -> Option<Party> {
        self.inner.get(name).map(|r| r.value().clone())
    }

    fn register(&self, party: Party) {
        self.inner.insert(party.name.clone(), party);
    }

    fn parties(&self) -> Vec<Party> {
        self.inner.iter().map(|r| r.value().clone()).collect()
    }

    fn replace_all(&self, parties: Vec<Party>) {
        let keep: HashSet<String> = parties.iter().map(|p| p.name.clone()).collect();
        for party in parties {
            self.inner.insert(party.name.clone(), party);
        }
        self.inner.retain(|name, _| keep.contains(name));
    }
}
