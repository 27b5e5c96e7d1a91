//! Token Verifier Middleware
//! Mission: Resolve Bearer tokens to store-backed principals

use crate::auth::{
    api::AuthState,
    models::{Principal, Role},
};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Verification failures, all surfaced as HTTP 401 with a JSON message.
///
/// Each step of verification fails with its own variant so the login and
/// token paths stay distinguishable in logs, but the status code never
/// varies: auth failures are terminal and non-retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Header absent or not using the Bearer scheme.
    MissingToken,
    /// Scheme marker present but no token followed it.
    MalformedToken,
    /// Signature or expiry check failed; internal verification faults are
    /// normalized here, never propagated.
    InvalidOrExpiredToken,
    /// Token checked out but the embedded id matches no stored record.
    PrincipalNotFound,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "No token provided",
            AuthError::MalformedToken => "Malformed authorization header",
            AuthError::InvalidOrExpiredToken => "Invalid or expired token",
            AuthError::PrincipalNotFound => "Not authorized",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": self.message() })),
        )
            .into_response()
    }
}

/// Middleware guarding user routes: verifies the Bearer token and attaches
/// the resolved user principal (password stripped) to request extensions.
pub async fn require_user(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&req)?;
    let principal = resolve_principal(&auth, &token, Role::User)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Middleware guarding admin routes; identical pipeline, admin-table lookup.
pub async fn require_admin(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&req)?;
    let principal = resolve_principal(&auth, &token, Role::Admin)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Extract the raw token from the Authorization header.
fn bearer_token(req: &Request) -> Result<String, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedToken);
    }

    Ok(token.to_string())
}

/// Verify the token and resolve its subject against the credential store.
///
/// Stateless and idempotent: the same valid token resolves to the same
/// principal, modulo store mutation between calls. One store lookup per call.
fn resolve_principal(auth: &AuthState, token: &str, role: Role) -> Result<Principal, AuthError> {
    let claims = auth
        .issuer
        .verify(token)
        .map_err(|_| AuthError::InvalidOrExpiredToken)?;

    // A subject that is not a well-formed id is a malformed payload, which
    // normalizes to the same rejection as a bad signature.
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidOrExpiredToken)?;

    let found = match role {
        Role::User => auth.store.find_user_by_id(&id),
        Role::Admin => auth.store.find_admin_by_id(&id),
    }
    .map_err(|_| AuthError::PrincipalNotFound)?;

    found
        .map(|p| p.sanitized())
        .ok_or(AuthError::PrincipalNotFound)
}
