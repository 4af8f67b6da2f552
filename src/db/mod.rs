//! Database connection and operations

pub mod avaliations;
pub mod favorites;
pub mod sqlite_helpers;
pub mod users;

use anyhow::Result;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool as Pool;
#[cfg(feature = "postgres")]
use sqlx::PgPool as Pool;

pub use avaliations::{AvaliationRecord, AvaliationsRepository, CreateAvaliation, ReviewRecord};
pub use favorites::{CreateFavorite, FavoriteRecord, FavoritesRepository};
pub use users::{CreateUser, CreateUserOutcome, UserRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Get the maximum connection pool size from environment or default
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool and bootstrap the schema
    #[cfg(feature = "sqlite")]
    pub async fn connect(url: &str) -> Result<Self> {
        use std::str::FromStr;

        use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

        let connect_url = if url.starts_with("sqlite:") {
            url.to_string()
        } else {
            format!("sqlite://{}", url)
        };

        let options = SqliteConnectOptions::from_str(&connect_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(Self::get_max_connections())
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.bootstrap_schema().await?;
        Ok(db)
    }

    /// Create a new database connection pool and bootstrap the schema
    #[cfg(feature = "postgres")]
    pub async fn connect(url: &str) -> Result<Self> {
        use sqlx::postgres::PgPoolOptions;

        let pool = PgPoolOptions::new()
            .max_connections(Self::get_max_connections())
            .connect(url)
            .await?;

        let db = Self { pool };
        db.bootstrap_schema().await?;
        Ok(db)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Get a favorites repository
    pub fn favorites(&self) -> FavoritesRepository {
        FavoritesRepository::new(self.pool.clone())
    }

    /// Get an avaliations repository
    pub fn avaliations(&self) -> AvaliationsRepository {
        AvaliationsRepository::new(self.pool.clone())
    }

    /// Create tables if they do not exist yet.
    ///
    /// Idempotent; runs on every startup. The UNIQUE constraints on
    /// (user_id, place_id) and (user_email, place_id) are the authoritative
    /// backstop for concurrent duplicate writes.
    pub async fn bootstrap_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                profile_img TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                place_id TEXT NOT NULL,
                place_name TEXT NOT NULL,
                place_icon TEXT,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, place_id),
                FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS avaliations (
                id TEXT PRIMARY KEY,
                user_email TEXT NOT NULL COLLATE NOCASE,
                place_id TEXT NOT NULL,
                rating REAL NOT NULL,
                comment TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_email, place_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
