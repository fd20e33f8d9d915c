//! Invalidation Policy
//!
//! Decides which cache keys a write makes stale. Handlers report *what*
//! happened as a [`WriteEvent`]; the configured policy decides which keys go.

use std::str::FromStr;
use std::sync::Arc;

use crate::cache::keys;

// == Write Events ==
/// A committed write against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteEvent {
    ItemCreated {
        item_id: i64,
    },
    /// `order_id` is the owning order at the time of deletion, if any.
    ItemDeleted {
        item_id: i64,
        order_id: Option<i64>,
    },
    OrderCreated {
        order_id: i64,
        item_ids: Vec<i64>,
    },
    /// `item_ids` must be captured before the cascade removes the children.
    OrderDeleted {
        order_id: i64,
        item_ids: Vec<i64>,
    },
}

// == Policy Trait ==
/// Maps a write to the cache keys that must be dropped.
pub trait InvalidationPolicy: Send + Sync {
    fn keys_to_invalidate(&self, event: &WriteEvent) -> Vec<String>;

    /// Human-readable policy name for logs.
    fn name(&self) -> &'static str;
}

// == TTL Only ==
/// Never invalidates; readers may observe stale data for up to one TTL.
#[derive(Debug, Clone, Copy, Default)]
pub struct TtlOnly;

impl InvalidationPolicy for TtlOnly {
    fn keys_to_invalidate(&self, _event: &WriteEvent) -> Vec<String> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "ttl"
    }
}

// == Strict ==
/// Drops every key whose snapshot the write could have changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl InvalidationPolicy for Strict {
    fn keys_to_invalidate(&self, event: &WriteEvent) -> Vec<String> {
        match event {
            WriteEvent::ItemCreated { item_id } => {
                vec![
                    keys::INVENTORY_LIST.to_string(),
                    keys::inventory_item(*item_id),
                ]
            }
            WriteEvent::ItemDeleted { item_id, order_id } => {
                let mut stale = vec![
                    keys::INVENTORY_LIST.to_string(),
                    keys::inventory_item(*item_id),
                ];
                // The owning order's item count changes too.
                if let Some(order_id) = order_id {
                    stale.push(keys::ORDER_LIST.to_string());
                    stale.push(keys::order(*order_id));
                }
                stale
            }
            WriteEvent::OrderCreated { order_id, item_ids }
            | WriteEvent::OrderDeleted { order_id, item_ids } => {
                let mut stale = vec![
                    keys::ORDER_LIST.to_string(),
                    keys::order(*order_id),
                    keys::INVENTORY_LIST.to_string(),
                ];
                stale.extend(item_ids.iter().map(|id| keys::inventory_item(*id)));
                stale
            }
        }
    }

    fn name(&self) -> &'static str {
        "strict"
    }
}

// == Mode Selection ==
/// Configuration-level choice of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationMode {
    #[default]
    TtlOnly,
    Strict,
}

impl InvalidationMode {
    pub fn policy(self) -> Arc<dyn InvalidationPolicy> {
        match self {
            InvalidationMode::TtlOnly => Arc::new(TtlOnly),
            InvalidationMode::Strict => Arc::new(Strict),
        }
    }
}

impl FromStr for InvalidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ttl" | "ttl-only" | "none" => Ok(InvalidationMode::TtlOnly),
            "strict" => Ok(InvalidationMode::Strict),
            other => Err(format!("unknown invalidation mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_only_never_invalidates() {
        let events = [
            WriteEvent::ItemCreated { item_id: 1 },
            WriteEvent::ItemDeleted {
                item_id: 1,
                order_id: Some(2),
            },
            WriteEvent::OrderCreated {
                order_id: 2,
                item_ids: vec![3, 4],
            },
            WriteEvent::OrderDeleted {
                order_id: 2,
                item_ids: vec![3, 4],
            },
        ];

        for event in &events {
            assert!(TtlOnly.keys_to_invalidate(event).is_empty());
        }
    }

    #[test]
    fn test_strict_item_created() {
        let keys = Strict.keys_to_invalidate(&WriteEvent::ItemCreated { item_id: 7 });
        assert_eq!(keys, vec!["inventoryItems", "inventoryItem_7"]);
    }

    #[test]
    fn test_strict_unowned_item_deleted() {
        let keys = Strict.keys_to_invalidate(&WriteEvent::ItemDeleted {
            item_id: 7,
            order_id: None,
        });
        assert_eq!(keys, vec!["inventoryItems", "inventoryItem_7"]);
    }

    #[test]
    fn test_strict_owned_item_deleted_touches_order() {
        let keys = Strict.keys_to_invalidate(&WriteEvent::ItemDeleted {
            item_id: 7,
            order_id: Some(3),
        });
        assert!(keys.contains(&"orders".to_string()));
        assert!(keys.contains(&"order_3".to_string()));
    }

    #[test]
    fn test_strict_order_deleted_covers_cascade() {
        let keys = Strict.keys_to_invalidate(&WriteEvent::OrderDeleted {
            order_id: 3,
            item_ids: vec![10, 11],
        });
        assert_eq!(
            keys,
            vec![
                "orders",
                "order_3",
                "inventoryItems",
                "inventoryItem_10",
                "inventoryItem_11"
            ]
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("ttl".parse::<InvalidationMode>(), Ok(InvalidationMode::TtlOnly));
        assert_eq!(" Strict ".parse::<InvalidationMode>(), Ok(InvalidationMode::Strict));
        assert!("eager".parse::<InvalidationMode>().is_err());
    }

    #[test]
    fn test_mode_policy_names() {
        assert_eq!(InvalidationMode::TtlOnly.policy().name(), "ttl");
        assert_eq!(InvalidationMode::Strict.policy().name(), "strict");
    }
}
