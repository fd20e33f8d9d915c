//! Customer order record
//!
//! An order exclusively owns its line items; deleting the order removes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InventoryItem, NewInventoryItem};

/// Timestamp layout used in order summaries.
const SUMMARY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl Order {
    /// Attaches an item in memory. Not persisted on its own.
    pub fn add_item(&mut self, item: InventoryItem) {
        self.items.push(item);
    }

    /// Detaches the item with `item_id` in memory; absent ids are ignored.
    pub fn remove_item(&mut self, item_id: i64) -> Option<InventoryItem> {
        let index = self.items.iter().position(|item| item.item_id == item_id)?;
        Some(self.items.remove(index))
    }

    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.item_id).collect()
    }

    /// One-line description returned by the order endpoints.
    pub fn summary(&self) -> String {
        format!(
            "Order {} for {} | Items: {} | Placed: {}",
            self.order_id,
            self.customer_name,
            self.items.len(),
            self.order_date.format(SUMMARY_DATE_FORMAT)
        )
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    /// Defaults to the time of creation when omitted.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<NewInventoryItem>,
}
