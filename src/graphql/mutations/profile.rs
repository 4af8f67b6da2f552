//! Profile mutations: display name, password change, and password reset
//!
//! Every operation here needs a session. A missing or invalid session is a
//! domain failure, reported inside the result object, so unauthenticated
//! clients get the same response shape as everyone else.

use super::prelude::*;

#[derive(Default)]
pub struct ProfileMutations;

#[Object]
impl ProfileMutations {
    /// Change the display name shown alongside the user's reviews
    async fn change_name(&self, ctx: &Context<'_>, name: String) -> Result<NameResult> {
        let Some(session) = ctx.try_auth_user() else {
            tracing::warn!("Name change rejected: no session");
            return Ok(NameResult::err("Sessão inválida"));
        };
        let db = ctx.data_unchecked::<Database>();

        match db.users().update_name(&session.user_id, &name).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "Display name changed");
                Ok(NameResult::ok(user.name))
            }
            None => {
                tracing::warn!(user_id = %session.user_id, "Name change rejected: unknown user");
                Ok(NameResult::err("Sessão inválida"))
            }
        }
    }

    /// Email the user a short-lived password-reset link
    ///
    /// The reset token is the only state; nothing is stored per request.
    /// Mail transport failures are unexpected and surface as GraphQL errors.
    async fn change_password_request(&self, ctx: &Context<'_>) -> Result<StatusResult> {
        let Some(session) = ctx.try_auth_user() else {
            tracing::warn!("Password reset rejected: no session");
            return Ok(StatusResult::err("Sessão inválida"));
        };
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();
        let mailer = ctx.data_unchecked::<Mailer>();

        let Some(user) = db.users().get_by_id(&session.user_id).await? else {
            tracing::warn!(user_id = %session.user_id, "Password reset rejected: unknown user");
            return Ok(StatusResult::err("Sessão inválida"));
        };

        let token = auth.issue_reset_token(&user.id)?;
        mailer.send_password_reset(&user.email, &token).await?;

        tracing::info!(user_id = %user.id, "Password reset email requested");
        Ok(StatusResult::ok("Acesse seu email para continuar"))
    }

    /// Replace the account password after checking the current one
    ///
    /// A wrong current password leaves the stored hash untouched. OAuth-only
    /// accounts fail the check too, since their placeholder hash never
    /// verifies.
    async fn change_password(
        &self,
        ctx: &Context<'_>,
        input: ChangePasswordInput,
    ) -> Result<StatusResult> {
        let Some(session) = ctx.try_auth_user() else {
            tracing::warn!("Password change rejected: no session");
            return Ok(StatusResult::err("Sessão inválida"));
        };
        let db = ctx.data_unchecked::<Database>();
        let auth = ctx.data_unchecked::<AuthService>();

        let Some(user) = db.users().get_by_id(&session.user_id).await? else {
            tracing::warn!(user_id = %session.user_id, "Password change rejected: unknown user");
            return Ok(StatusResult::err("Sessão inválida"));
        };

        if !auth.verify_password(&input.password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Password change rejected: wrong password");
            return Ok(StatusResult::err("Invalid password"));
        }

        let new_hash = auth.hash_password(&input.new_password)?;
        db.users().update_password(&user.id, &new_hash).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(StatusResult::ok("Senha alterada com sucesso!"))
    }
}
