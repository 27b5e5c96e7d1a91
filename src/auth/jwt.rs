//! Session Token Issuer
//! Mission: Mint and verify signed, time-limited identity tokens

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Default token lifetime, matching the original store's 30-day sessions.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Issues and verifies stateless session tokens (HS256 JWT).
///
/// The signing secret is threaded in at construction; neither issuance nor
/// verification touches global state, and no server-side session record is
/// ever created. A token is valid iff its signature checks out and its
/// expiry has not passed.
pub struct TokenIssuer {
    secret: String,
    ttl_days: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, ttl_days: i64) -> Self {
        Self { secret, ttl_days }
    }

    /// Issue a token embedding `principal_id`, expiring `ttl_days` out.
    pub fn issue(&self, principal_id: &str) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::days(self.ttl_days))
            .context("Invalid expiry timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: principal_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration,
        };

        debug!(
            "Issuing session token for {}, expires in {}d",
            principal_id, self.ttl_days
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign session token")
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Every cryptographic or temporal failure surfaces as an error here;
    /// callers normalize it to a single invalid-or-expired rejection.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let issuer = TokenIssuer::new("test-secret-key-12345".to_string(), 30);
        let id = Uuid::new_v4().to_string();

        let token = issuer.issue(&id).unwrap();
        assert!(!token.is_empty());

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_is_idempotent() {
        let issuer = TokenIssuer::new("test-secret-key-12345".to_string(), 30);
        let token = issuer.issue("principal-1").unwrap();

        let first = issuer.verify(&token).unwrap();
        let second = issuer.verify(&token).unwrap();
        assert_eq!(first.sub, second.sub);
        assert_eq!(first.exp, second.exp);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = TokenIssuer::new("test-secret-key-12345".to_string(), 30);
        assert!(issuer.verify("invalid.token.here").is_err());
        assert!(issuer.verify("").is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let issuer1 = TokenIssuer::new("secret1".to_string(), 30);
        let issuer2 = TokenIssuer::new("secret2".to_string(), 30);

        let token = issuer1.issue("principal-1").unwrap();
        assert!(issuer2.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative ttl backdates the expiry well past the validation leeway.
        let issuer = TokenIssuer::new("test-secret-key-12345".to_string(), -1);
        let token = issuer.issue("principal-1").unwrap();

        let fresh = TokenIssuer::new("test-secret-key-12345".to_string(), 30);
        assert!(fresh.verify(&token).is_err());
    }
}
