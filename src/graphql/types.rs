//! GraphQL type definitions
//!
//! These types mirror our domain models but are decorated with async-graphql
//! attributes.

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::db::{FavoriteRecord, ReviewRecord};
use crate::services::PlaceSummary;

// ============================================================================
// Places
// ============================================================================

/// A place as returned by the external search provider
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Place {
    /// Provider place ID
    pub id: String,
    /// Category icon URL
    pub icon: Option<String>,
    /// Place name
    pub name: String,
    /// Formatted address
    pub address: Option<String>,
    /// Formatted phone number
    pub phone: Option<String>,
    /// Average provider rating
    pub rating: Option<f64>,
    /// Website URL
    pub website: Option<String>,
    /// Whether the place is open right now
    pub is_open: Option<bool>,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl From<PlaceSummary> for Place {
    fn from(p: PlaceSummary) -> Self {
        Self {
            id: p.id,
            icon: p.icon,
            name: p.name,
            address: p.address,
            phone: p.phone,
            rating: p.rating,
            website: p.website,
            is_open: p.is_open,
            lat: p.lat,
            lng: p.lng,
        }
    }
}

// ============================================================================
// Favorites
// ============================================================================

/// A place saved by a user
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Favorite {
    /// Provider place ID
    pub place_id: String,
    /// Place name as it was when saved
    pub place_name: String,
    /// Category icon URL
    pub place_icon: Option<String>,
}

impl From<FavoriteRecord> for Favorite {
    fn from(f: FavoriteRecord) -> Self {
        Self {
            place_id: f.place_id,
            place_name: f.place_name,
            place_icon: f.place_icon,
        }
    }
}

// ============================================================================
// Reviews
// ============================================================================

/// A review enriched with the reviewer's public profile
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Review {
    /// Provider place ID
    pub place_id: String,
    /// Reviewer display name
    pub name: String,
    /// Reviewer email
    pub email: String,
    /// Reviewer avatar URL
    pub profile_img: String,
    /// Rating given
    pub rating: f64,
    /// Review text
    pub comment: String,
}

impl From<ReviewRecord> for Review {
    fn from(r: ReviewRecord) -> Self {
        Self {
            place_id: r.place_id,
            name: r.name,
            email: r.email,
            profile_img: r.profile_img,
            rating: r.rating,
            comment: r.comment,
        }
    }
}

// ============================================================================
// Auth payloads
// ============================================================================

/// Profile and credentials returned after registration or login
#[derive(Debug, SimpleObject)]
pub struct AuthPayload {
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL derived from the email
    pub profile_img: String,
    /// Signed session token
    pub token: String,
    /// The user's saved places
    pub favorites: Vec<Favorite>,
}

/// Result of register, login, or OAuth login
#[derive(Debug, SimpleObject)]
pub struct AuthResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// The authenticated profile (if successful)
    pub user: Option<AuthPayload>,
    /// Domain error message (if failed)
    pub error: Option<String>,
}

impl AuthResult {
    pub fn ok(user: AuthPayload) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Status results
// ============================================================================

/// Result of a mutation that reports a human-readable status string
#[derive(Debug, SimpleObject)]
pub struct StatusResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Status message (if successful)
    pub message: Option<String>,
    /// Domain error message (if failed)
    pub error: Option<String>,
}

impl StatusResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(message.into()),
        }
    }
}

/// Result of the name change mutation
#[derive(Debug, SimpleObject)]
pub struct NameResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// The new display name (if successful)
    pub name: Option<String>,
    /// Domain error message (if failed)
    pub error: Option<String>,
}

impl NameResult {
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            success: true,
            name: Some(name.into()),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            name: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Input for user registration
#[derive(Debug, InputObject)]
pub struct RegisterUserInput {
    /// Email address (unique login identifier)
    pub email: String,
    /// Display name
    pub name: String,
    /// Password (will be hashed)
    pub password: String,
}

/// Input for submitting a review
#[derive(Debug, InputObject)]
pub struct AddAvaliationInput {
    /// Reviewer email
    pub user_email: String,
    /// Provider place ID
    pub place_id: String,
    /// Rating given
    pub rating: f64,
    /// Review text
    pub comment: String,
}

/// Input for toggling a favorite
#[derive(Debug, InputObject)]
pub struct SetFavoriteInput {
    /// Provider place ID
    pub place_id: String,
    /// Place name to store with the favorite
    pub place_name: String,
    /// Category icon URL
    pub place_icon: Option<String>,
}

/// Input for changing the account password
#[derive(Debug, InputObject)]
pub struct ChangePasswordInput {
    /// Current password
    pub password: String,
    /// Replacement password
    pub new_password: String,
}
