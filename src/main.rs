//! Storefront - e-commerce REST backend
//! Products, users, admins, and orders over a local document store,
//! guarded by stateless session tokens.

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_backend::{
    api::{build_router, AppState},
    auth::{AuthState, TokenIssuer},
    config::Config,
    store::{OrderStore, PrincipalStore, ProductStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let principals = Arc::new(PrincipalStore::new(&config.database_path)?);
    let products = Arc::new(ProductStore::new(&config.database_path)?);
    let orders = Arc::new(OrderStore::new(&config.database_path)?);
    let issuer = Arc::new(TokenIssuer::new(
        config.jwt_secret.clone(),
        config.token_ttl_days,
    ));

    info!("Store initialized at: {}", config.database_path);

    let auth = AuthState::new(principals, issuer);
    let state = AppState { products, orders };
    let app = build_router(state, auth);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Storefront API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
