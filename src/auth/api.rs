//! Authentication API Endpoints
//! Mission: Signup, login, and profile management

use crate::auth::{
    jwt::TokenIssuer,
    models::{
        AuthResponse, LoginRequest, Principal, PrincipalResponse, SignupRequest,
        UpdateProfileRequest,
    },
    password::match_password,
};
use crate::store::PrincipalStore;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use bcrypt::{hash, DEFAULT_COST};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state: the credential store and the token issuer, both
/// constructed once at startup with explicit configuration.
#[derive(Clone)]
pub struct AuthState {
    pub store: Arc<PrincipalStore>,
    pub issuer: Arc<TokenIssuer>,
}

impl AuthState {
    pub fn new(store: Arc<PrincipalStore>, issuer: Arc<TokenIssuer>) -> Self {
        Self { store, issuer }
    }
}

/// User signup - POST /api/users/signup
pub async fn signup(
    State(state): State<AuthState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthApiError> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AuthApiError::InvalidInput);
    }

    let exists = state
        .store
        .find_user_by_email(&payload.email)
        .map_err(|_| AuthApiError::Internal)?;
    if exists.is_some() {
        return Err(AuthApiError::EmailTaken);
    }

    // New accounts are always stored hashed; the plaintext comparator path
    // exists only for administratively-seeded records.
    let password_record =
        hash(&payload.password, DEFAULT_COST).map_err(|_| AuthApiError::Internal)?;

    let user = state
        .store
        .create_user(&payload.name, &payload.email, &password_record)
        .map_err(|_| AuthApiError::EmailTaken)?;

    let token = state
        .issuer
        .issue(&user.id.to_string())
        .map_err(|_| AuthApiError::Internal)?;

    info!("User signed up: {}", user.email);
    Ok((StatusCode::CREATED, Json(AuthResponse::new(&user, token))))
}

/// User login - POST /api/users/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthApiError> {
    let found = state
        .store
        .find_user_by_email(&payload.email)
        .map_err(|_| AuthApiError::Internal)?;
    authenticate(&state, found, &payload.email, &payload.password)
}

/// Admin login - POST /api/users/adminLogin
pub async fn admin_login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthApiError> {
    let found = state
        .store
        .find_admin_by_email(&payload.email)
        .map_err(|_| AuthApiError::Internal)?;
    authenticate(&state, found, &payload.email, &payload.password)
}

/// Shared login tail: compare the password record and mint a token.
///
/// Unknown email and failed comparison produce the identical rejection, so
/// the response never reveals whether an account exists. Both the user and
/// admin paths go through here; the 401 wording does not differ.
fn authenticate(
    state: &AuthState,
    found: Option<Principal>,
    email: &str,
    candidate: &str,
) -> Result<Json<AuthResponse>, AuthApiError> {
    let Some(principal) = found else {
        warn!("Failed login attempt: {}", email);
        return Err(AuthApiError::InvalidCredentials);
    };

    if !match_password(&principal.password, candidate) {
        warn!("Failed login attempt: {}", email);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .issuer
        .issue(&principal.id.to_string())
        .map_err(|_| AuthApiError::Internal)?;

    info!("Login successful: {} ({})", email, principal.role.as_str());
    Ok(Json(AuthResponse::new(&principal, token)))
}

/// Current user's profile - GET /api/users/profile (user token required)
pub async fn profile(Extension(principal): Extension<Principal>) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from_principal(&principal))
}

/// Update current user's profile - PUT /api/users/profile (user token required)
///
/// Absent fields keep their values; a supplied password is re-hashed before
/// it rewrites the stored record. Returns a fresh token with the new state.
pub async fn update_profile(
    State(state): State<AuthState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<AuthResponse>, AuthApiError> {
    // The attached principal is password-stripped; reload the stored record
    // so an update without a new password keeps the old one.
    let mut user = state
        .store
        .find_user_by_id(&principal.id)
        .map_err(|_| AuthApiError::Internal)?
        .ok_or(AuthApiError::Internal)?;

    if let Some(name) = payload.name.filter(|n| !n.trim().is_empty()) {
        user.name = name;
    }
    if let Some(email) = payload.email.filter(|e| !e.trim().is_empty()) {
        user.email = email;
    }
    if let Some(password) = payload.password.filter(|p| !p.is_empty()) {
        user.password = hash(&password, DEFAULT_COST).map_err(|_| AuthApiError::Internal)?;
    }

    state
        .store
        .update_user(&user)
        .map_err(|_| AuthApiError::InvalidInput)?;

    let token = state
        .issuer
        .issue(&user.id.to_string())
        .map_err(|_| AuthApiError::Internal)?;

    info!("Profile updated: {}", user.email);
    Ok(Json(AuthResponse::new(&user, token)))
}

/// List all users - GET /api/users (admin token required)
pub async fn list_users(
    State(state): State<AuthState>,
) -> Result<Json<Vec<PrincipalResponse>>, AuthApiError> {
    let users = state
        .store
        .list_users()
        .map_err(|_| AuthApiError::Internal)?;

    let response = users.iter().map(PrincipalResponse::from_principal).collect();
    Ok(Json(response))
}

/// Auth API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthApiError {
    InvalidCredentials,
    EmailTaken,
    InvalidInput,
    Internal,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthApiError::EmailTaken => (StatusCode::BAD_REQUEST, "User already exists"),
            AuthApiError::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid user data"),
            AuthApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let invalid = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

        let taken = AuthApiError::EmailTaken.into_response();
        assert_eq!(taken.status(), StatusCode::BAD_REQUEST);

        let internal = AuthApiError::Internal.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
