// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::{Database, UserRecord};
use crate::graphql::types::{AuthPayload, Favorite};
use crate::services::AuthService;

/// Minimum accepted password length for registration
pub(crate) const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check that an email address has a plausible user@domain.tld shape
pub(crate) fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Load a user's saved places and map them to the GraphQL shape
pub(crate) async fn favorites_for_user(db: &Database, user_id: &str) -> Result<Vec<Favorite>> {
    let records = db.favorites().list_for_user(user_id).await?;
    Ok(records.into_iter().map(Favorite::from).collect())
}

/// Assemble the authenticated profile payload returned by register, login,
/// and OAuth login: profile fields, a fresh session token, and the user's
/// saved places.
pub(crate) async fn auth_payload_for(
    db: &Database,
    auth: &AuthService,
    user: UserRecord,
) -> Result<AuthPayload> {
    let token = auth.issue_token(&user.id)?;
    let favorites = favorites_for_user(db, &user.id).await?;

    Ok(AuthPayload {
        email: user.email,
        name: user.name,
        profile_img: user.profile_img,
        token,
        favorites,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_accepts_common_shapes() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn test_valid_email_rejects_malformed() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing@tld"));
        assert!(!valid_email("spaces in@example.com"));
        assert!(!valid_email("@example.com"));
    }
}
