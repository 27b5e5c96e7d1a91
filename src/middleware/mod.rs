//! HTTP middleware.
//!
//! Request logging lives here; token verification middleware is part of the
//! auth module, next to the issuer it depends on.

pub mod logging;
