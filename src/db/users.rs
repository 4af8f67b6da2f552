//! Users repository
//!
//! Accounts are created by registration or by the first OAuth login. The
//! email column carries the UNIQUE constraint that backs duplicate-signup
//! detection.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool as Pool;
#[cfg(feature = "postgres")]
use sqlx::PgPool as Pool;

use super::sqlite_helpers::now_iso8601;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub profile_img: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub profile_img: String,
}

/// Result of an insert attempt against the unique email constraint
#[derive(Debug)]
pub enum CreateUserOutcome {
    Created(UserRecord),
    DuplicateEmail,
}

pub struct UsersRepository {
    pool: Pool,
}

impl UsersRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// A unique-constraint violation on email is reported as
    /// `DuplicateEmail` rather than an error, so concurrent duplicate
    /// registrations collapse into the same outcome.
    pub async fn create(&self, user: CreateUser) -> Result<CreateUserOutcome> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, profile_img, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.profile_img)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                let record = self
                    .get_by_id(&id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Failed to create user"))?;
                Ok(CreateUserOutcome::Created(record))
            }
            Err(e) => {
                if e.as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation())
                {
                    Ok(CreateUserOutcome::DuplicateEmail)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, (String, String, String, String, String, String, String)>(
            "SELECT id, email, name, password_hash, profile_img, created_at, updated_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserRecord {
            id: r.0,
            email: r.1,
            name: r.2,
            password_hash: r.3,
            profile_img: r.4,
            created_at: r.5,
            updated_at: r.6,
        }))
    }

    /// Get user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, (String, String, String, String, String, String, String)>(
            "SELECT id, email, name, password_hash, profile_img, created_at, updated_at FROM users WHERE email = ? COLLATE NOCASE"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserRecord {
            id: r.0,
            email: r.1,
            name: r.2,
            password_hash: r.3,
            profile_img: r.4,
            created_at: r.5,
            updated_at: r.6,
        }))
    }

    /// Update display name
    pub async fn update_name(&self, id: &str, name: &str) -> Result<Option<UserRecord>> {
        let now = now_iso8601();
        sqlx::query("UPDATE users SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get_by_id(id).await
    }

    /// Update password hash
    pub async fn update_password(&self, id: &str, password_hash: &str) -> Result<()> {
        let now = now_iso8601();
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count users
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    use super::*;
    use crate::db::Database;

    async fn test_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap()).await.unwrap();
        (dir, db)
    }

    fn sample_user() -> CreateUser {
        CreateUser {
            email: "user@example.com".to_string(),
            name: "Test User".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            profile_img: "https://s.gravatar.com/avatar/x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let (_dir, db) = test_db().await;

        let outcome = db.users().create(sample_user()).await.unwrap();
        let user = assert_matches!(outcome, CreateUserOutcome::Created(u) => u);
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.name, "Test User");

        let by_id = db.users().get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, user.email);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let (_dir, db) = test_db().await;
        db.users().create(sample_user()).await.unwrap();

        let found = db.users().get_by_email("USER@EXAMPLE.COM").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_reported_as_outcome() {
        let (_dir, db) = test_db().await;
        db.users().create(sample_user()).await.unwrap();

        let mut dup = sample_user();
        dup.email = "User@Example.com".to_string();
        let outcome = db.users().create(dup).await.unwrap();

        assert_matches!(outcome, CreateUserOutcome::DuplicateEmail);
        assert_eq!(db.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_name_returns_fresh_record() {
        let (_dir, db) = test_db().await;
        let outcome = db.users().create(sample_user()).await.unwrap();
        let user = assert_matches!(outcome, CreateUserOutcome::Created(u) => u);

        let updated = db
            .users()
            .update_name(&user.id, "Renamed")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, user.email);
    }

    #[tokio::test]
    async fn test_update_name_for_unknown_user_is_none() {
        let (_dir, db) = test_db().await;
        let updated = db.users().update_name("missing", "Renamed").await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_password_persists() {
        let (_dir, db) = test_db().await;
        let outcome = db.users().create(sample_user()).await.unwrap();
        let user = assert_matches!(outcome, CreateUserOutcome::Created(u) => u);

        db.users()
            .update_password(&user.id, "$2b$12$other")
            .await
            .unwrap();

        let reloaded = db.users().get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "$2b$12$other");
    }
}
