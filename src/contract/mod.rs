//! Purchase order domain: order data, the ledger state wrapping it, and the
//! contract rules governing its issuance.
//!
//! # Data Flow
//! ```text
//! PurchaseOrder (model.rs)
//!     → PurchaseOrderState (state.rs) with buyer, seller, linear id
//!     → TransactionState { state, notary } proposal
//!     → PurchaseOrderContract::verify (contract.rs) when a transaction is assembled
//! ```

#[allow(clippy::module_inception)]
pub mod contract;
pub mod model;
pub mod state;

pub use contract::{Commands, ContractError, PurchaseOrderContract};
pub use model::{Address, Item, PurchaseOrder};
pub use state::{PurchaseOrderState, UniqueIdentifier};
