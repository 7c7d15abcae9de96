//! Host ledger services consumed by the API.
//!
//! # Data Flow
//! ```text
//! NodeConfig + PO_NODE_PRIVATE_KEY
//!     → keys.rs (legal identity key)
//!     → identity.rs (name → party)
//!     → network_map.rs (party and notary directory)
//!     → vault.rs (recorded states, JSON snapshot)
//!     → hub.rs (ServiceHub handed to handlers)
//! ```
//!
//! # Design Decisions
//! - Each service is a trait so a real host can be plugged in behind it
//! - Consensus, notarisation and flow choreography are not implemented here

pub mod hub;
pub mod identity;
pub mod keys;
pub mod network_map;
pub mod transaction;
pub mod types;
pub mod vault;

pub use hub::ServiceHub;
pub use identity::{IdentityService, InMemoryIdentityService, Party};
pub use keys::NodeKey;
pub use network_map::{InMemoryNetworkMap, NetworkMapCache, NetworkSnapshot, NodeInfo};
pub use transaction::{StateAndRef, StateRef, TransactionState};
pub use types::{LedgerError, LedgerResult};
pub use vault::{InMemoryVault, VaultService};
