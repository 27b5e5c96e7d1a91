//! Authentication Module
//! Mission: Token issuance, verification middleware, and the dual-mode
//! password comparator

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use api::AuthState;
pub use jwt::TokenIssuer;
pub use middleware::{require_admin, require_user};
pub use password::{match_password, StoredPassword};
