pub mod auth;
pub mod avaliations;
pub mod favorites;
pub mod profile;

pub use auth::AuthMutations;
pub use avaliations::AvaliationMutations;
pub use favorites::FavoriteMutations;
pub use profile::ProfileMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{AuthService, Mailer};
}
