//! API Handlers
//!
//! HTTP request handlers for the auth, inventory and order endpoints.
//! Reads go through the read-through cache; writes go to the repository and
//! then report a [`WriteEvent`] so the invalidation policy can run.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use tracing::{info, warn};

use super::{AdminOnly, AppState};
use crate::auth::{AuthError, ADMIN_ROLE, KNOWN_ROLES};
use crate::cache::{keys, Snapshot, WriteEvent};
use crate::error::{AppError, Result};
use crate::models::{
    InventoryItem, LoginRequest, LoginResponse, MessageResponse, NewInventoryItem, NewOrder,
    Order, RegisterRequest,
};

/// `201 Created` with a `Location` header and a JSON string body.
type Created = (StatusCode, [(header::HeaderName, String); 1], Json<String>);

/// Handler for GET /
pub async fn root_handler() -> &'static str {
    "LogiTrack API"
}

// == Auth ==

/// Handler for POST /api/auth/create-role
///
/// Creates each known role that does not exist yet.
pub async fn create_role_handler(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    for role in KNOWN_ROLES {
        state.users.ensure_role(role).await?;
    }

    Ok(Json(MessageResponse::new("Role created successfully.")))
}

/// Handler for POST /api/auth/register
///
/// Creates the user, then grants the Admin role. Either step failing is a 400
/// carrying the validation errors.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .users
        .create_user(&req.username, req.email.as_deref(), &req.password)
        .await?;

    state.users.add_to_role(&req.username, ADMIN_ROLE).await?;
    info!(username = %req.username, "user registered");

    Ok(Json(MessageResponse::new("User registered successfully.")))
}

/// Handler for POST /api/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let identity = match state
        .users
        .verify_credentials(&req.username, &req.password)
        .await
    {
        Ok(identity) => identity,
        Err(AuthError::InvalidCredentials) => {
            warn!(username = %req.username, "login failed");
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(err) => return Err(err.into()),
    };

    let token = state.sessions.issue(&identity.username);
    info!(username = %identity.username, "user logged in");

    Ok(Json(LoginResponse::bearer(token)))
}

// == Inventory ==

/// Handler for GET /api/inventory
pub async fn list_inventory_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItem>>> {
    let repository = state.repository.clone();
    let snapshot = state
        .cache
        .get_or_fetch(keys::INVENTORY_LIST, state.cache_ttl, || async move {
            repository.list_items().await.map(Snapshot::Inventory)
        })
        .await?;

    Ok(Json(snapshot.into_inventory()?))
}

/// Handler for GET /api/inventory/:id
///
/// A miss is cached as a sentinel, so repeated lookups of a missing id stay
/// off the store until the entry expires.
pub async fn get_item_handler(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<String>> {
    let repository = state.repository.clone();
    let snapshot = state
        .cache
        .get_or_fetch(&keys::inventory_item(id), state.cache_ttl, || async move {
            repository.find_item(id).await.map(Snapshot::Item)
        })
        .await?;

    snapshot
        .into_item()?
        .map(|item| Json(item.display_info()))
        .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", id)))
}

/// Handler for POST /api/inventory
pub async fn create_item_handler(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Json(req): Json<NewInventoryItem>,
) -> Result<Created> {
    let item = state.repository.create_item(req).await?;
    info!(item_id = item.item_id, "inventory item created");

    state
        .record_write(WriteEvent::ItemCreated {
            item_id: item.item_id,
        })
        .await;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/inventory/{}", item.item_id))],
        Json(item.display_info()),
    ))
}

/// Handler for DELETE /api/inventory/:id
pub async fn delete_item_handler(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let removed = state
        .repository
        .delete_item(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", id)))?;
    info!(item_id = id, "inventory item deleted");

    state
        .record_write(WriteEvent::ItemDeleted {
            item_id: removed.item_id,
            order_id: removed.order_id,
        })
        .await;

    Ok(StatusCode::NO_CONTENT)
}

// == Orders ==

/// Handler for GET /api/orders
pub async fn list_orders_handler(
    _admin: AdminOnly,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let repository = state.repository.clone();
    let snapshot = state
        .cache
        .get_or_fetch(keys::ORDER_LIST, state.cache_ttl, || async move {
            repository.list_orders().await.map(Snapshot::Orders)
        })
        .await?;

    Ok(Json(snapshot.into_orders()?))
}

/// Handler for GET /api/orders/:id
pub async fn get_order_handler(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<String>> {
    let repository = state.repository.clone();
    let snapshot = state
        .cache
        .get_or_fetch(&keys::order(id), state.cache_ttl, || async move {
            repository.find_order(id).await.map(Snapshot::Order)
        })
        .await?;

    snapshot
        .into_order()?
        .map(|order| Json(order.summary()))
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
}

/// Handler for POST /api/orders
///
/// Not gated: any caller may place an order.
pub async fn create_order_handler(
    State(state): State<AppState>,
    Json(req): Json<NewOrder>,
) -> Result<Created> {
    let order = state.repository.create_order(req).await?;
    info!(
        order_id = order.order_id,
        items = order.items.len(),
        "order created"
    );

    state
        .record_write(WriteEvent::OrderCreated {
            order_id: order.order_id,
            item_ids: order.item_ids(),
        })
        .await;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/orders/{}", order.order_id))],
        Json(order.summary()),
    ))
}

/// Handler for DELETE /api/orders/:id
///
/// Removes the order and its items as one unit.
pub async fn delete_order_handler(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let removed = state
        .repository
        .delete_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;
    info!(
        order_id = id,
        cascaded = removed.items.len(),
        "order deleted"
    );

    state
        .record_write(WriteEvent::OrderDeleted {
            order_id: removed.order_id,
            item_ids: removed.item_ids(),
        })
        .await;

    Ok(StatusCode::NO_CONTENT)
}
