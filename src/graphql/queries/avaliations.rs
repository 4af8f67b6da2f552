//! Review listing queries

use super::prelude::*;

#[derive(Default)]
pub struct AvaliationQueries;

#[Object]
impl AvaliationQueries {
    /// List the reviews for a place, each joined with the reviewer's
    /// current public profile
    async fn get_avaliations(&self, ctx: &Context<'_>, place_id: String) -> Result<Vec<Review>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db.avaliations().list_for_place(&place_id).await?;
        Ok(records.into_iter().map(Review::from).collect())
    }
}
