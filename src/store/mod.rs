//! Persistence Layer
//! Mission: SQLite-backed stores for principals, products, and orders

pub mod orders;
pub mod principals;
pub mod products;

pub use orders::OrderStore;
pub use principals::PrincipalStore;
pub use products::ProductStore;
