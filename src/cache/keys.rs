//! Cache key builders
//!
//! Every fetch signature the API caches, in one place.

/// Key for the full inventory list.
pub const INVENTORY_LIST: &str = "inventoryItems";

/// Key for the full order list (orders with their items).
pub const ORDER_LIST: &str = "orders";

/// Key for a single inventory item lookup.
pub fn inventory_item(item_id: i64) -> String {
    format!("inventoryItem_{}", item_id)
}

/// Key for a single order lookup.
pub fn order(order_id: i64) -> String {
    format!("order_{}", order_id)
}
