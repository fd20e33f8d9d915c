//! API Module
//!
//! HTTP handlers and routing for the inventory and order API.
//!
//! # Endpoints
//! - `GET /` - Liveness text
//! - `POST /api/auth/create-role` - Ensure the Admin role exists
//! - `POST /api/auth/register` - Create a user with the Admin role
//! - `POST /api/auth/login` - Exchange credentials for a bearer token
//! - `GET|POST /api/inventory` - List (public) or create (Admin) items
//! - `GET|DELETE /api/inventory/:id` - Show or delete an item (Admin)
//! - `GET|POST /api/orders` - List (Admin) or create (public) orders
//! - `GET|DELETE /api/orders/:id` - Show or delete an order (Admin)

pub mod extract;
pub mod handlers;
pub mod routes;
mod state;

pub use extract::AdminOnly;
pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
