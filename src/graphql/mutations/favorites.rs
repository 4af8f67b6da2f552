//! Favorite toggling

use super::prelude::*;
use crate::db::CreateFavorite;

#[derive(Default)]
pub struct FavoriteMutations;

#[Object]
impl FavoriteMutations {
    /// Toggle a place in the user's saved list
    ///
    /// The first call for a (user, place) pair saves it, the next removes
    /// it. The insert is attempted first so two concurrent calls resolve to
    /// one add and one remove.
    async fn set_favorite(
        &self,
        ctx: &Context<'_>,
        input: SetFavoriteInput,
    ) -> Result<StatusResult> {
        let Some(session) = ctx.try_auth_user() else {
            tracing::warn!("Favorite toggle rejected: no session");
            return Ok(StatusResult::err("Sessão inválida"));
        };
        let db = ctx.data_unchecked::<Database>();

        let create = CreateFavorite {
            user_id: session.user_id.clone(),
            place_id: input.place_id.clone(),
            place_name: input.place_name,
            place_icon: input.place_icon,
        };

        if db.favorites().insert_if_absent(create).await? {
            tracing::info!(user_id = %session.user_id, place_id = %input.place_id, "Favorite added");
            return Ok(StatusResult::ok("Favorito adicionado"));
        }

        db.favorites()
            .delete_by_user_and_place(&session.user_id, &input.place_id)
            .await?;

        tracing::info!(user_id = %session.user_id, place_id = %input.place_id, "Favorite removed");
        Ok(StatusResult::ok("Favorito removido"))
    }
}
