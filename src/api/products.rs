//! Product Endpoints
//! Mission: Public catalog reads, admin-guarded mutations

use crate::api::{ApiError, AppState};
use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.list().map_err(|_| ApiError::Internal)?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .get(&id)
        .map_err(|_| ApiError::Internal)?
        .map(Json)
        .ok_or(ApiError::NotFound("Product not found"))
}

/// POST /api/products (admin)
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if payload.name.trim().is_empty() || payload.price < 0.0 {
        return Err(ApiError::Invalid("Invalid product data"));
    }

    let product = state
        .products
        .create(&payload)
        .map_err(|_| ApiError::Invalid("Invalid product data"))?;

    info!("Product created: {} ({})", product.name, product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id (admin)
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    if payload.price.is_some_and(|p| p < 0.0) {
        return Err(ApiError::Invalid("Invalid product data"));
    }

    state
        .products
        .update(&id, &payload)
        .map_err(|_| ApiError::Internal)?
        .map(Json)
        .ok_or(ApiError::NotFound("Product not found"))
}

/// DELETE /api/products/:id (admin)
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.products.delete(&id).map_err(|_| ApiError::Internal)?;
    if !deleted {
        return Err(ApiError::NotFound("Product not found"));
    }

    info!("Product removed: {}", id);
    Ok(Json(json!({ "message": "Product removed successfully" })))
}
