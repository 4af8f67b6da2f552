//! Service layer

pub mod auth;
pub mod facebook;
pub mod gravatar;
pub mod mail;
pub mod places;

pub use auth::{AuthConfig, AuthService, Claims};
pub use facebook::{FacebookClient, FacebookIdentity};
pub use gravatar::profile_image_url;
pub use mail::Mailer;
pub use places::{PlaceSummary, PlacesClient};
