//! Order Endpoints
//! Mission: Order creation and lifecycle updates

use crate::api::{ApiError, AppState};
use crate::models::{CreateOrderRequest, Order, UpdateOrderStatusRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct MyOrdersQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    if payload.order_items.is_empty() {
        return Err(ApiError::Invalid("No order items provided"));
    }

    let order = state
        .orders
        .create(&payload)
        .map_err(|_| ApiError::Invalid("Order creation failed"))?;

    info!("Order created: {} ({} items)", order.id, order.order_items.len());
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .get(&id)
        .map_err(|_| ApiError::Internal)?
        .map(Json)
        .ok_or(ApiError::NotFound("Order not found"))
}

/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.list(None).map_err(|_| ApiError::Internal)?;
    Ok(Json(orders))
}

/// GET /api/orders/myorders/list?userId=...
pub async fn my_orders(
    State(state): State<AppState>,
    Query(query): Query<MyOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .orders
        .list(query.user_id.as_ref())
        .map_err(|_| ApiError::Internal)?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/pay
pub async fn pay_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let paid = state
        .orders
        .mark_paid(&id)
        .map_err(|_| ApiError::Internal)?
        .ok_or(ApiError::NotFound("Order not found"))?;

    info!("Order paid: {}", id);
    Ok(Json(paid))
}

/// PUT /api/orders/:id/status
pub async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    // Absent status leaves the order unchanged, matching the upsert-ish
    // behavior of the original endpoint.
    let current = state
        .orders
        .get(&id)
        .map_err(|_| ApiError::Internal)?
        .ok_or(ApiError::NotFound("Order not found"))?;

    let status = payload.status.unwrap_or(current.status);

    let updated = state
        .orders
        .set_status(&id, status)
        .map_err(|_| ApiError::Internal)?
        .ok_or(ApiError::NotFound("Order not found"))?;

    info!("Order {} status -> {}", id, status.as_str());
    Ok(Json(updated))
}
