//! GraphQL authentication context
//!
//! The gateway verifies bearer tokens best-effort and attaches an `AuthUser`
//! to the request when verification succeeds. Verification failure never
//! blocks the request: resolvers that need a session check for themselves
//! and turn absence into their own domain error.

use async_graphql::{Context, ErrorExtensions, Result};
use serde::{Deserialize, Serialize};

use crate::services::AuthService;

/// User context extracted from JWT, available in GraphQL resolvers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
}

/// Verify a JWT token and extract user info
pub fn verify_token(auth: &AuthService, token: &str) -> Result<AuthUser> {
    let claims = auth.decode_token(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        async_graphql::Error::new(format!("Invalid token: {}", e))
            .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
    })
}

/// Extension trait to get authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;

    /// Get the authenticated user if present, or None
    fn try_auth_user(&self) -> Option<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>().ok_or_else(|| {
            async_graphql::Error::new("Authentication required")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
        })
    }

    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}
