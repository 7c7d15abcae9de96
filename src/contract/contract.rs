//! Issuance rules for purchase order states.
//!
//! A valid issuance transaction has:
//! - a timestamp,
//! - zero inputs and exactly one output per linear id,
//! - a single `Place` command signed by both buyer and seller.
//!
//! On top of that the order itself must ship to the UK, contain between 1
//! and 100 items (each with a positive amount) and be delivered after the
//! transaction timestamp.

use std::collections::BTreeMap;

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::contract::state::{PurchaseOrderState, UniqueIdentifier};
use crate::ledger::transaction::LedgerTransaction;

/// Text hashed into [`PurchaseOrderContract::legal_contract_reference`].
pub const LEGAL_CONTRACT_TEMPLATE: &str = "purchase order contract template and params";

/// Only country orders are delivered to.
pub const DELIVERY_COUNTRY: &str = "UK";

/// Upper bound on the summed item amounts of one order.
pub const MAX_TOTAL_ITEMS: i64 = 100;

const PLACE_NONCE_MASK: u64 = u64::MAX >> 2;

/// A contract requirement that a transaction failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed requirement: {0}")]
pub struct ContractError(pub &'static str);

/// Commands understood by the purchase order contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commands {
    /// Issue a new purchase order. The nonce keeps otherwise identical commands distinct.
    Place { nonce: u64 },
}

impl Commands {
    pub fn place() -> Self {
        // Low half of a v4 UUID with the variant bits cleared: 62 random bits.
        let nonce = (Uuid::new_v4().as_u128() as u64) & PLACE_NONCE_MASK;
        Commands::Place { nonce }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderContract {
    /// Hash of the underlying legal contract template and parameters.
    pub legal_contract_reference: B256,
}

impl Default for PurchaseOrderContract {
    fn default() -> Self {
        let digest = Sha256::digest(LEGAL_CONTRACT_TEMPLATE.as_bytes());
        Self {
            legal_contract_reference: B256::from_slice(&digest),
        }
    }
}

fn require(condition: bool, message: &'static str) -> Result<(), ContractError> {
    if condition {
        Ok(())
    } else {
        Err(ContractError(message))
    }
}

type Group<'a> = (Vec<&'a PurchaseOrderState>, Vec<&'a PurchaseOrderState>);

impl PurchaseOrderContract {
    /// Check an issuance transaction against every contract rule.
    pub fn verify(&self, tx: &LedgerTransaction<PurchaseOrderState, Commands>) -> Result<(), ContractError> {
        let timestamp = tx.timestamp.ok_or(ContractError("must be timestamped"))?;

        let groups = group_by_linear_id(tx);
        require(
            !groups.is_empty(),
            "Place command was not matched by any purchase order state.",
        )?;

        let place_commands: Vec<_> = tx
            .commands
            .iter()
            .filter(|c| matches!(c.value, Commands::Place { .. }))
            .collect();
        require(place_commands.len() == 1, "Required a single Place command.")?;
        let command = place_commands[0];

        for (inputs, outputs) in groups.values() {
            require(inputs.is_empty(), "No inputs should be consumed when issuing a purchase order.")?;
            require(outputs.len() == 1, "Only one output state should be created for each group.")?;
            let out = outputs[0];

            require(out.buyer != out.seller, "The buyer and the seller cannot be the same entity.")?;
            require(
                out.participants().iter().all(|k| command.signers.contains(k)),
                "All of the participants must be signers.",
            )?;

            require(
                out.po.delivery_address.country == DELIVERY_COUNTRY,
                "We only deliver to the UK.",
            )?;
            require(!out.po.items.is_empty(), "You must order at least one type of item.")?;
            require(
                out.po.items.iter().all(|item| item.amount > 0),
                "You cannot order zero or negative amounts of an item.",
            )?;
            require(
                out.po.total_amount() <= MAX_TOTAL_ITEMS,
                "You can only order up to 100 items in total.",
            )?;
            require(
                out.po.delivery_date > timestamp.midpoint,
                "The delivery date must be in the future.",
            )?;
        }

        Ok(())
    }
}

fn group_by_linear_id(tx: &LedgerTransaction<PurchaseOrderState, Commands>) -> BTreeMap<&UniqueIdentifier, Group<'_>> {
    let mut groups: BTreeMap<&UniqueIdentifier, Group<'_>> = BTreeMap::new();
    for input in &tx.inputs {
        groups.entry(&input.linear_id).or_default().0.push(input);
    }
    for output in &tx.outputs {
        groups.entry(&output.linear_id).or_default().1.push(output);
    }
    groups
}
