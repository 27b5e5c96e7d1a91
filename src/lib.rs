//! Storefront Backend Library
//!
//! Exposes the application modules for the server binary, the seed binary,
//! and the integration tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod models;
pub mod store;
