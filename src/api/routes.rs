//! API Routes
//!
//! Configures the Axum router with all endpoints. Admin gating lives on the
//! handlers themselves via the [`AdminOnly`](super::AdminOnly) extractor.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item_handler, create_order_handler, create_role_handler, delete_item_handler,
    delete_order_handler, get_item_handler, get_order_handler, list_inventory_handler,
    list_orders_handler, login_handler, register_handler, root_handler,
};
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/auth/create-role", post(create_role_handler))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route(
            "/api/inventory",
            get(list_inventory_handler).post(create_item_handler),
        )
        .route(
            "/api/inventory/:id",
            get(get_item_handler).delete(delete_item_handler),
        )
        .route(
            "/api/orders",
            get(list_orders_handler).post(create_order_handler),
        )
        .route(
            "/api/orders/:id",
            get(get_order_handler).delete(delete_order_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
