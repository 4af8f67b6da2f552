pub mod auth;
pub mod avaliations;
pub mod places;

pub use auth::AuthQueries;
pub use avaliations::AvaliationQueries;
pub use places::PlaceQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{AuthService, FacebookClient, PlacesClient};
}
