//! SQLite repository
//!
//! Durable storage for the `orders` and `inventoryItems` tables. The schema is
//! created on connect; `inventoryItems.orderId` references `orders.orderId`
//! with `ON DELETE CASCADE`, so removing an order removes its items in the
//! same statement.

use std::collections::BTreeMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{query, query_as};
use tracing::{debug, info};

use super::{Repository, StoreError, StoreResult};
use crate::models::{InventoryItem, NewInventoryItem, NewOrder, Order};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        orderId INTEGER PRIMARY KEY AUTOINCREMENT,
        customerName TEXT NOT NULL,
        orderDate TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventoryItems (
        itemId INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        location TEXT NOT NULL,
        orderId INTEGER NULL REFERENCES orders (orderId) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS IX_inventoryItems_orderId ON inventoryItems (orderId)",
];

type ItemRow = (i64, String, u32, String, Option<i64>);
type OrderRow = (i64, String, DateTime<Utc>);

const SELECT_ITEMS: &str = "SELECT itemId, Name, quantity, location, orderId FROM inventoryItems";
const SELECT_ORDERS: &str = "SELECT orderId, customerName, orderDate FROM orders";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

fn item_from_row(row: ItemRow) -> InventoryItem {
    InventoryItem {
        item_id: row.0,
        name: row.1,
        quantity: row.2,
        location: row.3,
        order_id: row.4,
    }
}

fn order_from_row(row: OrderRow, items: Vec<InventoryItem>) -> Order {
    Order {
        order_id: row.0,
        customer_name: row.1,
        order_date: row.2,
        items,
    }
}

#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    ///
    /// `sqlite::memory:` gives a private database that lives as long as the pool.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database, so pin the pool to one.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        for statement in SCHEMA {
            query(*statement).execute(&pool).await?;
        }
        info!(url, "SQLite repository ready");

        Ok(Self { pool })
    }

    /// The connection pool, for tables that live beside items and orders.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn items_of(&self, order_id: i64) -> StoreResult<Vec<InventoryItem>> {
        let rows: Vec<ItemRow> =
            query_as(&format!("{} WHERE orderId = ? ORDER BY itemId", SELECT_ITEMS))
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(item_from_row).collect())
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows: Vec<ItemRow> = query_as(&format!("{} ORDER BY itemId", SELECT_ITEMS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(item_from_row).collect())
    }

    async fn find_item(&self, item_id: i64) -> StoreResult<Option<InventoryItem>> {
        let row: Option<ItemRow> = query_as(&format!("{} WHERE itemId = ?", SELECT_ITEMS))
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(item_from_row))
    }

    async fn create_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        let item_id = query(
            "INSERT INTO inventoryItems (Name, quantity, location, orderId) VALUES (?, ?, ?, NULL)",
        )
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.location)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        debug!(item_id, "inserted inventory item");

        Ok(InventoryItem {
            item_id,
            name: item.name,
            quantity: item.quantity,
            location: item.location,
            order_id: None,
        })
    }

    async fn delete_item(&self, item_id: i64) -> StoreResult<Option<InventoryItem>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<ItemRow> = query_as(&format!("{} WHERE itemId = ?", SELECT_ITEMS))
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        query("DELETE FROM inventoryItems WHERE itemId = ?")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(item_from_row(row)))
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let orders: Vec<OrderRow> = query_as(&format!("{} ORDER BY orderId", SELECT_ORDERS))
            .fetch_all(&self.pool)
            .await?;
        let items: Vec<ItemRow> = query_as(&format!(
            "{} WHERE orderId IS NOT NULL ORDER BY itemId",
            SELECT_ITEMS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: BTreeMap<i64, Vec<InventoryItem>> = BTreeMap::new();
        for item in items.into_iter().map(item_from_row) {
            if let Some(order_id) = item.order_id {
                by_order.entry(order_id).or_default().push(item);
            }
        }

        Ok(orders
            .into_iter()
            .map(|row| {
                let items = by_order.remove(&row.0).unwrap_or_default();
                order_from_row(row, items)
            })
            .collect())
    }

    async fn find_order(&self, order_id: i64) -> StoreResult<Option<Order>> {
        let row: Option<OrderRow> = query_as(&format!("{} WHERE orderId = ?", SELECT_ORDERS))
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let items = self.items_of(order_id).await?;
                Ok(Some(order_from_row(row, items)))
            }
            None => Ok(None),
        }
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let order_date = order.order_date.unwrap_or_else(Utc::now);
        let mut tx = self.pool.begin().await?;

        let order_id = query("INSERT INTO orders (customerName, orderDate) VALUES (?, ?)")
            .bind(&order.customer_name)
            .bind(order_date)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let mut items = Vec::with_capacity(order.items.len());
        for item in order.items {
            let item_id = query(
                "INSERT INTO inventoryItems (Name, quantity, location, orderId) VALUES (?, ?, ?, ?)",
            )
            .bind(&item.name)
            .bind(item.quantity)
            .bind(&item.location)
            .bind(order_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            items.push(InventoryItem {
                item_id,
                name: item.name,
                quantity: item.quantity,
                location: item.location,
                order_id: Some(order_id),
            });
        }

        tx.commit().await?;
        debug!(order_id, items = items.len(), "inserted order");

        Ok(Order {
            order_id,
            customer_name: order.customer_name,
            order_date,
            items,
        })
    }

    async fn delete_order(&self, order_id: i64) -> StoreResult<Option<Order>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<OrderRow> = query_as(&format!("{} WHERE orderId = ?", SELECT_ORDERS))
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        // Read the children inside the transaction, before the cascade removes them.
        let children: Vec<ItemRow> =
            query_as(&format!("{} WHERE orderId = ? ORDER BY itemId", SELECT_ITEMS))
                .bind(order_id)
                .fetch_all(&mut *tx)
                .await?;

        query("DELETE FROM orders WHERE orderId = ?")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let items: Vec<InventoryItem> = children.into_iter().map(item_from_row).collect();
        debug!(order_id, cascaded = items.len(), "deleted order");

        Ok(Some(order_from_row(row, items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn memory() -> SqliteRepository {
        SqliteRepository::connect("sqlite::memory:").await.unwrap()
    }

    fn order_with(count: usize) -> NewOrder {
        NewOrder {
            customer_name: "Acme".to_string(),
            order_date: Some(Utc.with_ymd_and_hms(2025, 5, 10, 18, 9, 7).unwrap()),
            items: (0..count)
                .map(|i| NewInventoryItem::new(format!("Line {}", i), 1, "B2"))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_item() {
        let repo = memory().await;

        let created = repo
            .create_item(NewInventoryItem::new("Pallet", 10, "A1"))
            .await
            .unwrap();
        assert_eq!(created.item_id, 1);

        assert_eq!(repo.find_item(1).await.unwrap(), Some(created));
        assert!(repo.find_item(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_autoincrement_ids_are_not_reused() {
        let repo = memory().await;

        let first = repo
            .create_item(NewInventoryItem::new("Pallet", 10, "A1"))
            .await
            .unwrap();
        repo.delete_item(first.item_id).await.unwrap();
        let second = repo
            .create_item(NewInventoryItem::new("Crate", 2, "A2"))
            .await
            .unwrap();

        assert_eq!(second.item_id, first.item_id + 1);
    }

    #[tokio::test]
    async fn test_order_round_trips_with_items() {
        let repo = memory().await;

        let created = repo.create_order(order_with(2)).await.unwrap();
        let found = repo.find_order(created.order_id).await.unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(
            found.summary(),
            "Order 1 for Acme | Items: 2 | Placed: 2025-05-10 18:09:07"
        );
    }

    #[tokio::test]
    async fn test_foreign_key_cascade_removes_children() {
        let repo = memory().await;

        let loose = repo
            .create_item(NewInventoryItem::new("Pallet", 10, "A1"))
            .await
            .unwrap();
        let order = repo.create_order(order_with(3)).await.unwrap();

        let removed = repo.delete_order(order.order_id).await.unwrap().unwrap();
        assert_eq!(removed.item_ids(), order.item_ids());

        assert_eq!(repo.list_items().await.unwrap(), vec![loose]);
        assert!(repo.list_orders().await.unwrap().is_empty());
        assert!(repo.delete_order(order.order_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_item_reports_owner() {
        let repo = memory().await;

        let order = repo.create_order(order_with(2)).await.unwrap();
        let removed = repo
            .delete_item(order.items[0].item_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.order_id, Some(order.order_id));

        let orders = repo.list_orders().await.unwrap();
        assert_eq!(orders[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_data_survives_reconnect() {
        let path = std::env::temp_dir().join(format!("logitrack-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}", path.display());

        {
            let repo = SqliteRepository::connect(&url).await.unwrap();
            repo.create_order(order_with(1)).await.unwrap();
            repo.pool.close().await;
        }

        let reopened = SqliteRepository::connect(&url).await.unwrap();
        let orders = reopened.list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items.len(), 1);

        reopened.pool.close().await;
        let _ = std::fs::remove_file(&path);
    }
}
