//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (for generating URLs)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// Allowed CORS origin for the browser client
    pub cors_origin: String,

    /// Database URL (PostgreSQL) or path (SQLite)
    /// For SQLite: use DATABASE_PATH or DATABASE_URL with sqlite:// prefix
    pub database_url: String,

    /// JWT secret for token signing and verification
    pub jwt_secret: String,

    /// Default token lifetime in days
    pub jwt_expiration_days: i64,

    /// Places search API key
    pub google_api_key: Option<String>,

    /// SMTP relay host for transactional mail
    pub smtp_host: Option<String>,

    /// SMTP username
    pub smtp_username: Option<String>,

    /// SMTP password
    pub smtp_password: Option<String>,

    /// From address for outgoing mail
    pub mail_from: String,

    /// Base URL of the web client (password-reset links point here)
    pub client_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // For SQLite, prefer DATABASE_PATH, fall back to DATABASE_URL
        #[cfg(feature = "sqlite")]
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./data/places.db".to_string());

        #[cfg(feature = "postgres")]
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is required")?;

        // JWT_SECRET is always required - generate a random one if not provided in dev
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            // In production, this should be set explicitly
            // For development, generate a random secret
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};
            let mut hasher = DefaultHasher::new();
            std::time::SystemTime::now().hash(&mut hasher);
            format!("dev-secret-{}", hasher.finish())
        });

        Ok(Self {
            host: env::var("HOST").ok(),

            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            database_url,

            jwt_secret,

            jwt_expiration_days: env::var("JWT_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("Invalid JWT_EXPIRATION_DAYS")?,

            google_api_key: env::var("GOOGLE_API_KEY").ok(),

            smtp_host: env::var("SMTP_HOST").ok(),

            smtp_username: env::var("SMTP_USERNAME").ok(),

            smtp_password: env::var("SMTP_PASSWORD").ok(),

            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Places <no-reply@places.local>".to_string()),

            client_url: env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}
