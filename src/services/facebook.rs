//! Facebook Graph API client for OAuth identity exchange
//!
//! Base URL: https://graph.facebook.com

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Graph API client
pub struct FacebookClient {
    client: Client,
    base_url: String,
}

/// Profile fields returned by the `/me` endpoint.
///
/// Either field can be absent when the token lacks the matching permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacebookIdentity {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl FacebookClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://graph.facebook.com".to_string(),
        }
    }

    /// Exchange an OAuth access token for the holder's email and name
    pub async fn get_identity(&self, access_token: &str) -> Result<FacebookIdentity> {
        info!("Exchanging OAuth access token for identity");

        let url = format!("{}/me", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("fields", "email,name"), ("access_token", access_token)])
            .send()
            .await
            .context("Failed to reach identity provider")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Identity exchange failed with status: {}",
                response.status()
            );
        }

        let identity: FacebookIdentity = response
            .json()
            .await
            .context("Failed to parse identity response")?;

        Ok(identity)
    }
}

impl Default for FacebookClient {
    fn default() -> Self {
        Self::new()
    }
}
