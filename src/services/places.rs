//! Google Places API client for nearby place search
//!
//! Base URL: https://maps.googleapis.com/maps/api/place

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Places API client
///
/// The API key is optional at construction; searches fail with a
/// configuration error when it is absent.
pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Nearby search response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    pub results: Vec<ProviderPlace>,
    pub status: String,
}

/// A place entry as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderPlace {
    pub place_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub opening_hours: Option<ProviderOpeningHours>,
    pub geometry: ProviderGeometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOpeningHours {
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderGeometry {
    pub location: ProviderLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Provider place reshaped into the application's place shape.
///
/// Provider fields pass through verbatim; absent phone/website/rating stay
/// absent rather than being defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: String,
    pub icon: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub is_open: Option<bool>,
    pub lat: f64,
    pub lng: f64,
}

impl From<ProviderPlace> for PlaceSummary {
    fn from(p: ProviderPlace) -> Self {
        let is_open = p.opening_hours.and_then(|h| h.open_now);
        Self {
            id: p.place_id,
            icon: p.icon,
            name: p.name,
            address: p.formatted_address,
            phone: p.formatted_phone_number,
            rating: p.rating,
            website: p.website,
            is_open,
            lat: p.geometry.location.lat,
            lng: p.geometry.location.lng,
        }
    }
}

impl PlacesClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            api_key,
        }
    }

    /// Search for places by name around a coordinate.
    ///
    /// The radius is given in kilometers and converted to the meters the
    /// provider expects. Results are localized to pt-BR.
    pub async fn nearby_search(
        &self,
        place: &str,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<PlaceSummary>> {
        let Some(api_key) = self.api_key.as_deref() else {
            anyhow::bail!("GOOGLE_API_KEY is not configured");
        };

        info!(place = %place, lat, lng, radius_km, "Searching places");

        let url = format!("{}/nearbysearch/json", self.base_url);
        let location = format!("{},{}", lat, lng);
        let radius_m = (radius_km * 1000.0).to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("location", location.as_str()),
                ("key", api_key),
                ("radius", radius_m.as_str()),
                ("name", place),
                ("language", "pt-BR"),
            ])
            .send()
            .await
            .context("Failed to query places API")?;

        if !response.status().is_success() {
            anyhow::bail!("Places search failed with status: {}", response.status());
        }

        let body: NearbySearchResponse = response
            .json()
            .await
            .context("Failed to parse places search results")?;

        debug!(count = body.results.len(), status = %body.status, "Places search returned results");

        Ok(body.results.into_iter().map(PlaceSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_summary_mapping() {
        let provider = ProviderPlace {
            place_id: "abc123".to_string(),
            name: "Cafe Central".to_string(),
            icon: Some("https://maps.example/icon.png".to_string()),
            formatted_address: Some("Rua A, 1".to_string()),
            formatted_phone_number: None,
            rating: Some(4.5),
            website: None,
            opening_hours: Some(ProviderOpeningHours {
                open_now: Some(true),
            }),
            geometry: ProviderGeometry {
                location: ProviderLocation {
                    lat: -23.5,
                    lng: -46.6,
                },
            },
        };

        let place = PlaceSummary::from(provider);
        assert_eq!(place.id, "abc123");
        assert_eq!(place.is_open, Some(true));
        assert_eq!(place.phone, None);
        assert_eq!(place.lat, -23.5);
    }

    #[test]
    fn test_missing_opening_hours_maps_to_none() {
        let provider = ProviderPlace {
            place_id: "x".to_string(),
            name: "Bar".to_string(),
            icon: None,
            formatted_address: None,
            formatted_phone_number: None,
            rating: None,
            website: None,
            opening_hours: None,
            geometry: ProviderGeometry {
                location: ProviderLocation { lat: 0.0, lng: 0.0 },
            },
        };

        assert_eq!(PlaceSummary::from(provider).is_open, None);
    }
}
