//! The ledger state recording an agreed purchase order.

use std::collections::HashSet;
use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::contract::contract::{Commands, PurchaseOrderContract};
use crate::contract::model::PurchaseOrder;
use crate::ledger::identity::Party;
use crate::ledger::transaction::{Command, TransactionBuilder};

/// Identifier shared by every version of a linear state.
///
/// Rendered as `<external_id>_<uuid>`, or just `<uuid>` without an external id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueIdentifier {
    pub external_id: Option<String>,
    pub id: Uuid,
}

impl UniqueIdentifier {
    pub fn new(external_id: Option<String>) -> Self {
        Self {
            external_id,
            id: Uuid::new_v4(),
        }
    }
}

impl std::fmt::Display for UniqueIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.external_id {
            Some(ext) => write!(f, "{}_{}", ext, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

impl FromStr for UniqueIdentifier {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The uuid never contains '_', so the last one separates the external id.
        match s.rsplit_once('_') {
            Some((ext, id)) => Ok(Self {
                external_id: Some(ext.to_string()),
                id: id.parse()?,
            }),
            None => Ok(Self {
                external_id: None,
                id: s.parse()?,
            }),
        }
    }
}

impl Serialize for UniqueIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UniqueIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Agreement between a buyer and a seller over a [`PurchaseOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderState {
    pub po: PurchaseOrder,
    pub buyer: Party,
    pub seller: Party,
    pub contract: PurchaseOrderContract,
    pub linear_id: UniqueIdentifier,
    /// Reference for matching external systems; the order number.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl PurchaseOrderState {
    pub fn new(po: PurchaseOrder, buyer: Party, seller: Party, contract: PurchaseOrderContract) -> Self {
        let linear_id = UniqueIdentifier::new(Some(po.order_number.to_string()));
        let reference = po.order_number.to_string();
        Self {
            po,
            buyer,
            seller,
            contract,
            linear_id,
            reference,
        }
    }

    /// Parties involved in the deal.
    pub fn parties(&self) -> [&Party; 2] {
        [&self.buyer, &self.seller]
    }

    /// Keys able to consume this state.
    pub fn participants(&self) -> Vec<Address> {
        self.parties().iter().map(|p| p.owning_key).collect()
    }

    /// Whether a vault holding `our_keys` should track this state.
    pub fn is_relevant(&self, our_keys: &HashSet<Address>) -> bool {
        self.participants().iter().any(|k| our_keys.contains(k))
    }

    /// Unsigned issuance transaction placing this order.
    pub fn generate_agreement(&self, notary: Party) -> TransactionBuilder<PurchaseOrderState, Commands> {
        TransactionBuilder::new(notary).with_items(
            self.clone(),
            Command {
                value: Commands::place(),
                signers: self.participants(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn state() -> PurchaseOrderState {
        PurchaseOrderState::new(
            PurchaseOrder::placeholder(Utc::now()),
            Party::new("NodeA", Address::repeat_byte(0xaa)),
            Party::new("NodeB", Address::repeat_byte(0xbb)),
            PurchaseOrderContract::default(),
        )
    }

    #[test]
    fn test_linear_id_uses_order_number() {
        let s = state();
        assert_eq!(s.linear_id.external_id.as_deref(), Some("1"));
        assert_eq!(s.reference, "1");
        assert!(s.linear_id.to_string().starts_with("1_"));
    }

    #[test]
    fn test_unique_identifier_parse() {
        let id = UniqueIdentifier::new(Some("po_42".to_string()));
        let parsed: UniqueIdentifier = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        let bare = UniqueIdentifier::new(None);
        let parsed: UniqueIdentifier = bare.to_string().parse().unwrap();
        assert_eq!(parsed.external_id, None);

        assert!("1_not-a-uuid".parse::<UniqueIdentifier>().is_err());
    }

    #[test]
    fn test_relevance() {
        let s = state();
        let ours: HashSet<_> = [Address::repeat_byte(0xbb)].into_iter().collect();
        assert!(s.is_relevant(&ours));

        let strangers: HashSet<_> = [Address::repeat_byte(0xcc)].into_iter().collect();
        assert!(!s.is_relevant(&strangers));
    }

    #[test]
    fn test_generate_agreement() {
        let s = state();
        let notary = Party::new("Controller", Address::repeat_byte(0x01));
        let tx = s.generate_agreement(notary.clone());

        assert_eq!(tx.notary(), &notary);
        assert_eq!(tx.outputs().len(), 1);
        assert_eq!(tx.outputs()[0].data, s);
        assert_eq!(tx.commands().len(), 1);
        assert_eq!(tx.commands()[0].signers, s.participants());
    }

    #[test]
    fn test_json_uses_ref_and_string_linear_id() {
        let s = state();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["ref"], "1");
        assert_eq!(json["linear_id"], s.linear_id.to_string());
        assert_eq!(json["po"]["delivery_address"]["country"], "UK");
    }
}
