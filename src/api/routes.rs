//! Router Assembly
//! Mission: Wire public, user-guarded, and admin-guarded routes

use crate::api::{orders, products};
use crate::auth::{api as auth_api, require_admin, require_user, AuthState};
use crate::middleware::logging::request_logging_simple;
use crate::store::{OrderStore, ProductStore};
use axum::{
    handler::Handler,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for the catalog and order handlers.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductStore>,
    pub orders: Arc<OrderStore>,
}

/// Build the full application router.
///
/// Product mutations carry the admin guard per method so reads on the same
/// paths stay public; profile routes carry the user guard as a route layer.
pub fn build_router(state: AppState, auth: AuthState) -> Router {
    let store_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/api/products",
            get(products::list_products).post(
                products::create_product
                    .layer(middleware::from_fn_with_state(auth.clone(), require_admin)),
            ),
        )
        .route(
            "/api/products/:id",
            get(products::get_product)
                .put(
                    products::update_product
                        .layer(middleware::from_fn_with_state(auth.clone(), require_admin)),
                )
                .delete(
                    products::delete_product
                        .layer(middleware::from_fn_with_state(auth.clone(), require_admin)),
                ),
        )
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/myorders/list", get(orders::my_orders))
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/pay", put(orders::pay_order))
        .route("/api/orders/:id/status", put(orders::set_order_status))
        .with_state(state);

    let auth_routes = Router::new()
        .route("/api/users/signup", post(auth_api::signup))
        .route("/api/users/login", post(auth_api::login))
        .route("/api/users/adminLogin", post(auth_api::admin_login))
        .with_state(auth.clone());

    let profile_routes = Router::new()
        .route(
            "/api/users/profile",
            get(auth_api::profile).put(auth_api::update_profile),
        )
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_user))
        .with_state(auth.clone());

    let admin_routes = Router::new()
        .route("/api/users", get(auth_api::list_users))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_admin))
        .with_state(auth);

    Router::new()
        .merge(store_routes)
        .merge(auth_routes)
        .merge(profile_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_logging_simple))
        .layer(CorsLayer::permissive())
}

/// GET / - service banner
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Storefront API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "products": "/api/products",
            "users": "/api/users",
            "orders": "/api/orders",
        }
    }))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
