//! GraphQL schema definition with queries, mutations, and subscriptions
//!
//! The roots are merged from per-domain resolver structs living in the
//! queries/ and mutations/ modules.

use std::sync::Arc;

use async_graphql::{MergedObject, Schema};

use crate::db::Database;
use crate::events::ReviewEvents;
use crate::services::{AuthService, FacebookClient, Mailer, PlacesClient};

use super::mutations::{AuthMutations, AvaliationMutations, FavoriteMutations, ProfileMutations};
use super::queries::{AuthQueries, AvaliationQueries, PlaceQueries};
use super::subscriptions::SubscriptionRoot;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AuthQueries, PlaceQueries, AvaliationQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    AuthMutations,
    ProfileMutations,
    AvaliationMutations,
    FavoriteMutations,
);

/// The GraphQL schema type
pub type PlacesSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the GraphQL schema with all resolvers
pub fn build_schema(
    db: Database,
    auth_service: AuthService,
    places_client: Arc<PlacesClient>,
    facebook_client: Arc<FacebookClient>,
    mailer: Mailer,
    events: ReviewEvents,
) -> PlacesSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(db)
    .data(auth_service)
    .data(places_client)
    .data(facebook_client)
    .data(mailer)
    .data(events)
    .finish()
}
