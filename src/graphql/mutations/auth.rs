//! Account registration
//!
//! Registration is the only mutation that needs no session. Validation
//! failures and duplicate emails come back as domain errors inside the
//! result object.

use super::prelude::*;
use crate::db::{CreateUser, CreateUserOutcome};
use crate::services::profile_image_url;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Register a new account and open a session for it
    ///
    /// The avatar is derived from the email, the password is hashed before
    /// storage, and email uniqueness is decided by the database constraint
    /// rather than a prior lookup.
    async fn register_user(
        &self,
        ctx: &Context<'_>,
        input: RegisterUserInput,
    ) -> Result<AuthResult> {
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();

        if !valid_email(&input.email) {
            tracing::warn!(email = %input.email, "Registration rejected: malformed email");
            return Ok(AuthResult::err("Email inválido"));
        }

        if input.password.len() < MIN_PASSWORD_LEN {
            tracing::warn!(email = %input.email, "Registration rejected: password too short");
            return Ok(AuthResult::err("Senha muito curta (Min. 8 caracteres)"));
        }

        let create = CreateUser {
            email: input.email.clone(),
            name: input.name,
            password_hash: auth.hash_password(&input.password)?,
            profile_img: profile_image_url(&input.email),
        };

        match db.users().create(create).await? {
            CreateUserOutcome::Created(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                let payload = auth_payload_for(db, auth, user).await?;
                Ok(AuthResult::ok(payload))
            }
            CreateUserOutcome::DuplicateEmail => {
                tracing::warn!(email = %input.email, "Registration rejected: email in use");
                Ok(AuthResult::err("Este email já está em uso"))
            }
        }
    }
}
