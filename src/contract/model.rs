//! Purchase order data the buyer and seller agree on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub country: String,
}

impl Address {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }
}

/// An ordered catalogue item. The buyer is assumed to hold the seller's catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub amount: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, amount: i32) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub order_number: i32,
    pub delivery_date: DateTime<Utc>,
    pub delivery_address: Address,
    pub items: Vec<Item>,
}

impl PurchaseOrder {
    pub fn new(
        order_number: i32,
        delivery_date: DateTime<Utc>,
        delivery_address: Address,
        items: Vec<Item>,
    ) -> Self {
        Self {
            order_number,
            delivery_date,
            delivery_address,
            items,
        }
    }

    /// Fixed order used by the create endpoint until request bodies are parsed.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self::new(1, now, Address::new("London", "UK"), vec![Item::new("thing", 4)])
    }

    /// Sum of all item amounts.
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.amount)).sum()
    }
}
