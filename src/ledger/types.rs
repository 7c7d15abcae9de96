//! Ledger-facing error definitions.

use thiserror::Error;

/// Errors raised by the host service seams.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Name did not resolve against the identity service.
    #[error("Unknown party: {0}")]
    UnknownParty(String),

    /// The network map advertises no notary.
    #[error("No notary registered in the network map")]
    NotaryNotFound,

    /// The network map advertises more than one notary.
    #[error("Expected a single notary, found {0}")]
    AmbiguousNotary(usize),

    /// Owning key in the directory could not be parsed.
    #[error("Invalid owning key '{key}' for {party}")]
    InvalidKey { party: String, key: String },

    /// Node legal identity key could not be loaded.
    #[error("Key error: {0}")]
    Key(String),

    /// Vault snapshot could not be read or written.
    #[error("Vault persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// Vault snapshot is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
