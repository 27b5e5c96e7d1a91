//! Configuration
//! Mission: Collect runtime settings from the environment once, at startup

use crate::auth::jwt::DEFAULT_TOKEN_TTL_DAYS;
use anyhow::{Context, Result};
use std::env;

/// Runtime configuration.
///
/// The signing secret is read here and threaded into the token issuer at
/// construction; no other part of the system touches the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "storefront.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let token_ttl_days = env::var("TOKEN_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&d| d > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_DAYS);

        Ok(Self {
            port,
            database_path,
            jwt_secret,
            token_ttl_days,
        })
    }
}
