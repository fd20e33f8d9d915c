//! Persistence Module
//!
//! Data-access interface over inventory items and orders. Reads return plain
//! values; there is no change tracking.

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use thiserror::Error;
use tracing::warn;

use crate::models::{InventoryItem, NewInventoryItem, NewOrder, Order};

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;

// == Store Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Repository Trait ==
/// CRUD access to the `orders` and `inventoryItems` tables.
///
/// Ids are assigned by the store on creation. Deleting an order removes its
/// items in the same operation.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>>;

    async fn find_item(&self, item_id: i64) -> StoreResult<Option<InventoryItem>>;

    async fn create_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem>;

    /// Returns the removed row, or `None` if no such item existed.
    async fn delete_item(&self, item_id: i64) -> StoreResult<Option<InventoryItem>>;

    /// All orders with their items loaded.
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    async fn find_order(&self, order_id: i64) -> StoreResult<Option<Order>>;

    /// Inserts the order and all of its items.
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order>;

    /// Removes the order and cascades to its items. The returned order still
    /// lists the items that were removed with it.
    async fn delete_order(&self, order_id: i64) -> StoreResult<Option<Order>>;
}

/// An opened backing store.
pub struct Storage {
    pub repository: Arc<dyn Repository>,
    /// Set when the store is SQLite, so the user tables can share the database
    pub pool: Option<SqlitePool>,
}

/// Opens the SQLite database at `database_url`, or a process-local store when
/// no URL is configured.
pub async fn open(database_url: Option<&str>) -> StoreResult<Storage> {
    match database_url {
        Some(url) => {
            let repository = SqliteRepository::connect(url).await?;
            Ok(Storage {
                pool: Some(repository.pool().clone()),
                repository: Arc::new(repository),
            })
        }
        None => {
            warn!("No database configured; all data is kept in memory only");
            Ok(Storage {
                repository: Arc::new(InMemoryRepository::new()),
                pool: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_without_url_is_in_memory() {
        let storage = open(None).await.unwrap();
        assert!(storage.pool.is_none());
        assert!(storage.repository.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_sqlite_url() {
        let storage = open(Some("sqlite::memory:")).await.unwrap();
        assert!(storage.pool.is_some());
        let repo = storage.repository;
        let item = repo
            .create_item(NewInventoryItem::new("Pallet", 10, "A1"))
            .await
            .unwrap();
        assert_eq!(repo.find_item(item.item_id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_open_bad_url_is_unavailable() {
        let result = open(Some("sqlite:///no-such-dir/logitrack/db.sqlite")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
