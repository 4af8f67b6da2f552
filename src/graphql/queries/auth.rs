//! Session queries: password login, Facebook login, and the current profile
//!
//! Login lives on the query root rather than the mutation root; the original
//! client issues it as a read and the schema keeps that contract.

use super::prelude::*;

#[derive(Default)]
pub struct AuthQueries;

#[Object]
impl AuthQueries {
    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password collapse into the same domain error
    /// so the response does not reveal whether the account exists.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthResult> {
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();

        let user = match db.users().get_by_email(&email).await? {
            Some(user) if auth.verify_password(&password, &user.password_hash) => user,
            _ => {
                tracing::warn!(email = %email, "Login failed");
                return Ok(AuthResult::err("Email ou senha incorretos"));
            }
        };

        tracing::info!(user_id = %user.id, "User logged in");
        let payload = auth_payload_for(db, auth, user).await?;
        Ok(AuthResult::ok(payload))
    }

    /// Authenticate with a Facebook access token
    ///
    /// Finds or creates the account tied to the Facebook email. Accounts
    /// created this way carry a placeholder password hash that can never
    /// verify, so they remain OAuth-only.
    async fn fb_login(&self, ctx: &Context<'_>, access_token: String) -> Result<AuthResult> {
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();
        let facebook = ctx.data_unchecked::<Arc<FacebookClient>>();

        let identity = match facebook.get_identity(&access_token).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Facebook identity lookup failed");
                return Ok(AuthResult::err("Não foi possível realizar a autenticação"));
            }
        };

        let (Some(email), Some(name)) = (identity.email, identity.name) else {
            tracing::warn!("Facebook identity missing email or name");
            return Ok(AuthResult::err("Não foi possível realizar a autenticação"));
        };

        let user = match db.users().get_by_email(&email).await? {
            Some(user) => user,
            None => {
                let create = crate::db::CreateUser {
                    email: email.clone(),
                    name,
                    password_hash: "-".to_string(),
                    profile_img: crate::services::profile_image_url(&email),
                };
                match db.users().create(create).await? {
                    crate::db::CreateUserOutcome::Created(user) => {
                        tracing::info!(user_id = %user.id, "Facebook account provisioned");
                        user
                    }
                    // Lost a concurrent-signup race; the row is there now.
                    crate::db::CreateUserOutcome::DuplicateEmail => db
                        .users()
                        .get_by_email(&email)
                        .await?
                        .ok_or_else(|| async_graphql::Error::new("User lookup failed"))?,
                }
            }
        };

        tracing::info!(user_id = %user.id, "User logged in via Facebook");
        let payload = auth_payload_for(db, auth, user).await?;
        Ok(AuthResult::ok(payload))
    }

    /// The authenticated user's profile and saved places
    ///
    /// Requires a valid session; unlike the domain operations this surfaces
    /// absence as a transport-level UNAUTHORIZED error.
    async fn me(&self, ctx: &Context<'_>) -> Result<AuthPayload> {
        let session = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();

        let user = db
            .users()
            .get_by_id(&session.user_id)
            .await?
            .ok_or_else(|| async_graphql::Error::new("User not found"))?;

        auth_payload_for(db, auth, user).await
    }
}
