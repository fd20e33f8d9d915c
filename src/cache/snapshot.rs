//! Cached snapshot values
//!
//! The single value type the API stores in its read-through cache. Point
//! lookups keep `None` as a not-found sentinel so repeated misses stay cached.

use thiserror::Error;

use crate::models::{InventoryItem, Order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Inventory(Vec<InventoryItem>),
    Item(Option<InventoryItem>),
    Orders(Vec<Order>),
    Order(Option<Order>),
}

/// A cache key held a different kind of snapshot than its reader expected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cached snapshot mismatch: expected {expected}, found {found}")]
pub struct SnapshotMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl Snapshot {
    fn kind(&self) -> &'static str {
        match self {
            Snapshot::Inventory(_) => "inventory",
            Snapshot::Item(_) => "item",
            Snapshot::Orders(_) => "orders",
            Snapshot::Order(_) => "order",
        }
    }

    fn mismatch(&self, expected: &'static str) -> SnapshotMismatch {
        SnapshotMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn into_inventory(self) -> Result<Vec<InventoryItem>, SnapshotMismatch> {
        match self {
            Snapshot::Inventory(items) => Ok(items),
            other => Err(other.mismatch("inventory")),
        }
    }

    pub fn into_item(self) -> Result<Option<InventoryItem>, SnapshotMismatch> {
        match self {
            Snapshot::Item(item) => Ok(item),
            other => Err(other.mismatch("item")),
        }
    }

    pub fn into_orders(self) -> Result<Vec<Order>, SnapshotMismatch> {
        match self {
            Snapshot::Orders(orders) => Ok(orders),
            other => Err(other.mismatch("orders")),
        }
    }

    pub fn into_order(self) -> Result<Option<Order>, SnapshotMismatch> {
        match self {
            Snapshot::Order(order) => Ok(order),
            other => Err(other.mismatch("order")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_distinct_from_absent_entry() {
        let sentinel = Snapshot::Item(None);
        assert_eq!(sentinel.clone().into_item(), Ok(None));
        assert_ne!(sentinel, Snapshot::Inventory(Vec::new()));
    }

    #[test]
    fn test_mismatched_variant_is_an_error() {
        assert_eq!(
            Snapshot::Item(None).into_orders(),
            Err(SnapshotMismatch {
                expected: "orders",
                found: "item",
            })
        );
        assert!(Snapshot::Orders(Vec::new()).into_order().is_err());
        assert!(Snapshot::Order(None).into_inventory().is_err());
        assert!(Snapshot::Inventory(Vec::new()).into_item().is_err());
    }
}
