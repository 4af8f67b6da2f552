//! Authentication service for password hashing and JWT handling
//!
//! Provides:
//! - Password hashing with bcrypt
//! - JWT token generation and validation
//! - Short-lived tokens for the password-reset flow

use anyhow::{Result, anyhow};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Lifetime of a password-reset token in seconds
pub const RESET_TOKEN_LIFETIME_SECS: i64 = 5 * 60;

/// Claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Default token lifetime in seconds
    pub token_lifetime: i64,
    /// Bcrypt cost factor (default: 12)
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, expiration_days: i64) -> Self {
        Self {
            jwt_secret,
            token_lifetime: expiration_days * 24 * 60 * 60,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Hash a password with bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    /// Verify a password against a stored hash.
    ///
    /// OAuth-created accounts store the literal placeholder "-" instead of a
    /// bcrypt hash; verification against it always fails, which keeps the
    /// password-login path closed for those accounts.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        verify(password, stored_hash).unwrap_or(false)
    }

    /// Issue a token with the default lifetime
    pub fn issue_token(&self, user_id: &str) -> Result<String> {
        self.issue_token_with_lifetime(user_id, self.config.token_lifetime)
    }

    /// Issue a short-lived token for the password-reset email
    pub fn issue_reset_token(&self, user_id: &str) -> Result<String> {
        self.issue_token_with_lifetime(user_id, RESET_TOKEN_LIFETIME_SECS)
    }

    fn issue_token_with_lifetime(&self, user_id: &str, lifetime_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(lifetime_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| anyhow!("Failed to create token: {}", e))
    }

    /// Decode and validate a token, returning its claims
    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig::new("test-secret".to_string(), 7))
    }

    #[test]
    fn test_token_roundtrip() {
        let svc = service();
        let token = svc.issue_token("user-123").unwrap();
        let claims = svc.decode_token(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_reset_token_is_short_lived() {
        let svc = service();
        let token = svc.issue_reset_token("user-123").unwrap();
        let claims = svc.decode_token(&token).unwrap();
        assert!(claims.exp - claims.iat <= RESET_TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let svc = service();
        assert!(svc.decode_token("not-a-token").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue_token("user-123").unwrap();
        let other = AuthService::new(AuthConfig::new("other-secret".to_string(), 7));
        assert!(other.decode_token(&token).is_err());
    }

    #[test]
    fn test_password_roundtrip() {
        let svc = service();
        let hash = svc.hash_password("hunter22").unwrap();
        assert!(svc.verify_password("hunter22", &hash));
        assert!(!svc.verify_password("hunter23", &hash));
    }

    #[test]
    fn test_placeholder_hash_never_verifies() {
        let svc = service();
        assert!(!svc.verify_password("-", "-"));
        assert!(!svc.verify_password("anything", "-"));
    }
}
