//! Place search queries backed by the external provider

use super::prelude::*;

#[derive(Default)]
pub struct PlaceQueries;

#[Object]
impl PlaceQueries {
    /// Search for places by name around a coordinate
    ///
    /// The radius is in kilometers. Provider failures surface as GraphQL
    /// errors; an empty result set is a normal response.
    async fn get_place(
        &self,
        ctx: &Context<'_>,
        place: String,
        lat: f64,
        lng: f64,
        radius: f64,
    ) -> Result<Vec<Place>> {
        let places = ctx.data_unchecked::<Arc<PlacesClient>>();

        let summaries = places.nearby_search(&place, lat, lng, radius).await?;
        Ok(summaries.into_iter().map(Place::from).collect())
    }
}
