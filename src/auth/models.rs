//! Authentication Models
//! Mission: Define principal and session data structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticatable identity resolved from a store record.
///
/// Two variants exist in storage (users and admins, separate tables); the
/// shape is identical so both share this struct, distinguished by `role`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub password: String, // raw stored record (hashed or plaintext) - never serialize
    pub created_at: String,
}

impl Principal {
    /// Copy with the password field stripped, for attaching to requests.
    pub fn sanitized(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// Principal roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (principal id)
    pub iat: usize,  // issued-at timestamp
    pub exp: usize,  // expiration timestamp
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request body
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Profile update body; absent fields keep their current values.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login / signup response: sanitized principal plus a fresh token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl AuthResponse {
    pub fn new(principal: &Principal, token: String) -> Self {
        Self {
            id: principal.id,
            name: principal.name.clone(),
            email: principal.email.clone(),
            role: principal.role,
            token,
        }
    }
}

/// Principal response (sanitized, no token)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl PrincipalResponse {
    pub fn from_principal(p: &Principal) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            email: p.email.clone(),
            role: p.role,
            created_at: p.created_at.clone(),
        }
    }
}
