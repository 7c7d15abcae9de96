//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the network directory (unique names, parsable owning keys)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NodeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::{NetworkConfig, NodeConfig, PLACEHOLDER_ADMIN_KEY};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}


/// Validate a full node configuration.
pub fn validate_config(config: &NodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.node.legal_name.trim().is_empty() {
        errors.push(ValidationError::new("node.legal_name", "must not be empty"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than zero"));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}', expected 'pretty' or 'json'", other),
        )),
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled {
        if config.admin.api_key.is_empty() || config.admin.api_key == PLACEHOLDER_ADMIN_KEY {
            errors.push(ValidationError::new(
                "admin.api_key",
                "must be set to a non-placeholder value when the admin API is enabled",
            ));
        }
        if config.admin.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "admin.bind_address",
                format!("'{}' is not a socket address", config.admin.bind_address),
            ));
        }
    }

    errors.extend(validate_network(&config.network));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the network directory section on its own (used on hot reload too).
pub fn validate_network(network: &NetworkConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    let entries = network
        .parties
        .iter()
        .enumerate()
        .map(|(i, p)| (format!("network.parties[{}]", i), p))
        .chain(
            network
                .notaries
                .iter()
                .enumerate()
                .map(|(i, p)| (format!("network.notaries[{}]", i), p)),
        );

    for (path, party) in entries {
        if party.name.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.name", path), "must not be empty"));
        } else if !seen.insert(party.name.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.name", path),
                format!("duplicate party name '{}'", party.name),
            ));
        }

        if party.owning_key.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                format!("{}.owning_key", path),
                format!("'{}' is not a 20-byte hex address", party.owning_key),
            ));
        }
    }

    errors
}
