//! Legal identity key of the serving node.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized; only the derived address is

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::ledger::types::{LedgerError, LedgerResult};

/// Environment variable name for the node private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PO_NODE_PRIVATE_KEY";

/// Key pair backing the node's legal identity.
#[derive(Debug, Clone)]
pub struct NodeKey {
    signer: PrivateKeySigner,
}

impl NodeKey {
    /// Create a key from a hex-encoded private key string (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> LedgerResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| LedgerError::Key(format!("Invalid private key format: {}", e)))?;

        Ok(Self { signer })
    }

    /// Load the key from `PO_NODE_PRIVATE_KEY`.
    pub fn from_env() -> LedgerResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            LedgerError::Key(format!("Environment variable {} not set", PRIVATE_KEY_ENV_VAR))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Generate an ephemeral key.
    pub fn random() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    /// Use the environment key when present, otherwise an ephemeral one.
    ///
    /// A key that is present but malformed is an error, not a fallback.
    pub fn load_or_generate() -> LedgerResult<Self> {
        if std::env::var_os(PRIVATE_KEY_ENV_VAR).is_some() {
            let key = Self::from_env()?;
            tracing::info!(owning_key = %key.address(), "Node key loaded from environment");
            Ok(key)
        } else {
            let key = Self::random();
            tracing::warn!(
                owning_key = %key.address(),
                "{} not set, using an ephemeral node key",
                PRIVATE_KEY_ENV_VAR
            );
            Ok(key)
        }
    }

    /// The owning key published in the network map.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_key_from_private_key() {
        let key = NodeKey::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            key.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_key_with_0x_prefix() {
        let key = NodeKey::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(
            key.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = NodeKey::from_private_key("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_random_keys_differ() {
        assert_ne!(NodeKey::random().address(), NodeKey::random().address());
    }
}
