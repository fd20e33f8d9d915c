//! In-memory repository
//!
//! Two autoincrement tables behind a single `RwLock`, with the
//! `inventoryItems.orderId -> orders.orderId` cascade applied on order delete.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::{Repository, StoreResult};
use crate::models::{InventoryItem, NewInventoryItem, NewOrder, Order};

#[derive(Debug, Clone)]
struct OrderRow {
    order_id: i64,
    customer_name: String,
    order_date: DateTime<Utc>,
}

#[derive(Debug)]
struct Tables {
    items: BTreeMap<i64, InventoryItem>,
    orders: BTreeMap<i64, OrderRow>,
    next_item_id: i64,
    next_order_id: i64,
}

impl Tables {
    fn insert_item(&mut self, item: NewInventoryItem, order_id: Option<i64>) -> InventoryItem {
        let item_id = self.next_item_id;
        self.next_item_id += 1;

        let row = InventoryItem {
            item_id,
            name: item.name,
            quantity: item.quantity,
            location: item.location,
            order_id,
        };
        self.items.insert(item_id, row.clone());
        row
    }

    /// Eager-loads the order's items, ordered by item id.
    fn assemble(&self, row: &OrderRow) -> Order {
        Order {
            order_id: row.order_id,
            customer_name: row.customer_name.clone(),
            order_date: row.order_date,
            items: self
                .items
                .values()
                .filter(|item| item.order_id == Some(row.order_id))
                .cloned()
                .collect(),
        }
    }
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                items: BTreeMap::new(),
                orders: BTreeMap::new(),
                next_item_id: 1,
                next_order_id: 1,
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.tables.read().await.items.values().cloned().collect())
    }

    async fn find_item(&self, item_id: i64) -> StoreResult<Option<InventoryItem>> {
        Ok(self.tables.read().await.items.get(&item_id).cloned())
    }

    async fn create_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        let created = self.tables.write().await.insert_item(item, None);
        debug!(item_id = created.item_id, "inserted inventory item");
        Ok(created)
    }

    async fn delete_item(&self, item_id: i64) -> StoreResult<Option<InventoryItem>> {
        Ok(self.tables.write().await.items.remove(&item_id))
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.values().map(|row| tables.assemble(row)).collect())
    }

    async fn find_order(&self, order_id: i64) -> StoreResult<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&order_id).map(|row| tables.assemble(row)))
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;

        let order_id = tables.next_order_id;
        tables.next_order_id += 1;

        let row = OrderRow {
            order_id,
            customer_name: order.customer_name,
            order_date: order.order_date.unwrap_or_else(Utc::now),
        };

        let items = order
            .items
            .into_iter()
            .map(|item| tables.insert_item(item, Some(order_id)))
            .collect();

        tables.orders.insert(order_id, row.clone());
        debug!(order_id, "inserted order");

        Ok(Order {
            order_id,
            customer_name: row.customer_name,
            order_date: row.order_date,
            items,
        })
    }

    async fn delete_order(&self, order_id: i64) -> StoreResult<Option<Order>> {
        let mut tables = self.tables.write().await;

        let Some(row) = tables.orders.remove(&order_id) else {
            return Ok(None);
        };

        // Capture the children before the cascade removes them.
        let removed = tables.assemble(&row);
        tables.items.retain(|_, item| item.order_id != Some(order_id));

        debug!(order_id, cascaded = removed.items.len(), "deleted order");

        Ok(Some(removed))
    }
}
