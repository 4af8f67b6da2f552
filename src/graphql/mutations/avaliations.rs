//! Review submission
//!
//! A successful submission also publishes the place's recomputed review
//! list to the in-process event bus, which feeds the live subscription.

use super::prelude::*;
use crate::db::CreateAvaliation;
use crate::events::{AvaliationAddedEvent, ReviewEvents};

#[derive(Default)]
pub struct AvaliationMutations;

#[Object]
impl AvaliationMutations {
    /// Submit a review for a place
    ///
    /// One review per (user, place) pair; the uniqueness constraint decides
    /// the winner under concurrent submissions and the loser gets the
    /// duplicate-review domain error.
    async fn add_avaliation(
        &self,
        ctx: &Context<'_>,
        input: AddAvaliationInput,
    ) -> Result<StatusResult> {
        if ctx.try_auth_user().is_none() {
            tracing::warn!("Review rejected: no session");
            return Ok(StatusResult::err("Sessão inválida"));
        }
        let db = ctx.data_unchecked::<Database>();
        let events = ctx.data_unchecked::<ReviewEvents>();

        let create = CreateAvaliation {
            user_email: input.user_email.clone(),
            place_id: input.place_id.clone(),
            rating: input.rating,
            comment: input.comment,
        };

        if !db.avaliations().insert_if_absent(create).await? {
            tracing::warn!(
                user_email = %input.user_email,
                place_id = %input.place_id,
                "Review rejected: already reviewed"
            );
            return Ok(StatusResult::err("Você já avaliou este lugar"));
        }

        let reviews = db.avaliations().list_for_place(&input.place_id).await?;
        tracing::info!(
            user_email = %input.user_email,
            place_id = %input.place_id,
            total = reviews.len(),
            "Review created"
        );

        events.publish(AvaliationAddedEvent {
            place_id: input.place_id,
            reviews,
        });

        Ok(StatusResult::ok("Avaliação criada"))
    }
}
