//! Domain records and request/response bodies for the API
//!
//! Records use camelCase on the wire to match existing clients.

pub mod inventory;
pub mod order;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use inventory::{InventoryItem, NewInventoryItem};
pub use order::{NewOrder, Order};
pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{LoginResponse, MessageResponse};
