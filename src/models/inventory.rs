//! Inventory item record

use serde::{Deserialize, Serialize};

/// A stocked item. `order_id` is set when the item is a line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub item_id: i64,
    pub name: String,
    pub quantity: u32,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

impl InventoryItem {
    /// One-line description returned by the item endpoints.
    pub fn display_info(&self) -> String {
        format!(
            "Item: {} | Quantity: {} | Location: {}",
            self.name, self.quantity, self.location
        )
    }
}

/// Body of `POST /api/inventory`, also used for order line items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[serde(alias = "Name")]
    pub name: String,
    pub quantity: u32,
    pub location: String,
}

impl NewInventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            location: location.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_info() {
        let item = InventoryItem {
            item_id: 1,
            name: "Pallet".to_string(),
            quantity: 10,
            location: "A1".to_string(),
            order_id: None,
        };
        assert_eq!(item.display_info(), "Item: Pallet | Quantity: 10 | Location: A1");
    }

    #[test]
    fn test_serializes_camel_case() {
        let item = InventoryItem {
            item_id: 4,
            name: "Crate".to_string(),
            quantity: 2,
            location: "B7".to_string(),
            order_id: Some(9),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemId"], 4);
        assert_eq!(json["orderId"], 9);

        let unowned = InventoryItem { order_id: None, ..item };
        let json = serde_json::to_value(&unowned).unwrap();
        assert!(json.get("orderId").is_none());
    }

    #[test]
    fn test_new_item_accepts_legacy_name_field() {
        let body = r#"{"Name":"Pallet","quantity":10,"location":"A1"}"#;
        let item: NewInventoryItem = serde_json::from_str(body).unwrap();
        assert_eq!(item, NewInventoryItem::new("Pallet", 10, "A1"));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let body = r#"{"name":"Pallet","quantity":-1,"location":"A1"}"#;
        assert!(serde_json::from_str::<NewInventoryItem>(body).is_err());
    }
}
