//! Avaliations (reviews) repository
//!
//! A review is identified by its (user_email, place_id) pair and is
//! immutable once created. The UNIQUE constraint makes the second insert
//! for a pair a no-op regardless of request interleaving.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool as Pool;
#[cfg(feature = "postgres")]
use sqlx::PgPool as Pool;

use super::sqlite_helpers::now_iso8601;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvaliationRecord {
    pub id: String,
    pub user_email: String,
    pub place_id: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateAvaliation {
    pub user_email: String,
    pub place_id: String,
    pub rating: f64,
    pub comment: String,
}

/// A review joined with its author's public profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub place_id: String,
    pub name: String,
    pub email: String,
    pub profile_img: String,
    pub rating: f64,
    pub comment: String,
}

pub struct AvaliationsRepository {
    pool: Pool,
}

impl AvaliationsRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert a review unless the (user, place) pair already has one.
    ///
    /// Returns true if a row was created; false leaves any existing review
    /// untouched.
    pub async fn insert_if_absent(&self, avaliation: CreateAvaliation) -> Result<bool> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        let result = sqlx::query(
            r#"
            INSERT INTO avaliations (id, user_email, place_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_email, place_id) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(&avaliation.user_email)
        .bind(&avaliation.place_id)
        .bind(avaliation.rating)
        .bind(&avaliation.comment)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get the review for a (user, place) pair
    pub async fn get_by_user_and_place(
        &self,
        user_email: &str,
        place_id: &str,
    ) -> Result<Option<AvaliationRecord>> {
        let row = sqlx::query_as::<_, (String, String, String, f64, String, String)>(
            "SELECT id, user_email, place_id, rating, comment, created_at FROM avaliations WHERE user_email = ? COLLATE NOCASE AND place_id = ?"
        )
        .bind(user_email)
        .bind(place_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| AvaliationRecord {
            id: r.0,
            user_email: r.1,
            place_id: r.2,
            rating: r.3,
            comment: r.4,
            created_at: r.5,
        }))
    }

    /// List all reviews for a place, enriched with the reviewer's profile
    pub async fn list_for_place(&self, place_id: &str) -> Result<Vec<ReviewRecord>> {
        let rows = sqlx::query_as::<_, (String, String, String, String, f64, String)>(
            r#"
            SELECT a.place_id, u.name, u.email, u.profile_img, a.rating, a.comment
            FROM avaliations a
            JOIN users u ON u.email = a.user_email COLLATE NOCASE
            WHERE a.place_id = ?
            ORDER BY a.created_at
            "#,
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ReviewRecord {
                place_id: r.0,
                name: r.1,
                email: r.2,
                profile_img: r.3,
                rating: r.4,
                comment: r.5,
            })
            .collect())
    }

    /// Count reviews for a place
    pub async fn count_for_place(&self, place_id: &str) -> Result<i64> {
        let row = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM avaliations WHERE place_id = ?",
        )
        .bind(place_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::db::Database;

    async fn test_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::connect(path.to_str().unwrap()).await.unwrap();
        (dir, db)
    }

    async fn seed_user(db: &Database, email: &str, name: &str) {
        db.users()
            .create(crate::db::CreateUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash: "$2b$12$hash".to_string(),
                profile_img: format!("https://s.gravatar.com/avatar/{}", name),
            })
            .await
            .unwrap();
    }

    fn sample_review(user_email: &str, place_id: &str) -> CreateAvaliation {
        CreateAvaliation {
            user_email: user_email.to_string(),
            place_id: place_id.to_string(),
            rating: 4.5,
            comment: "Ótimo lugar".to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_review_per_user_and_place() {
        let (_dir, db) = test_db().await;

        assert!(db
            .avaliations()
            .insert_if_absent(sample_review("a@example.com", "p1"))
            .await
            .unwrap());
        assert!(!db
            .avaliations()
            .insert_if_absent(sample_review("a@example.com", "p1"))
            .await
            .unwrap());

        assert_eq!(db.avaliations().count_for_place("p1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_same_user_can_review_other_places() {
        let (_dir, db) = test_db().await;

        assert!(db
            .avaliations()
            .insert_if_absent(sample_review("a@example.com", "p1"))
            .await
            .unwrap());
        assert!(db
            .avaliations()
            .insert_if_absent(sample_review("a@example.com", "p2"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_joins_reviewer_profile() {
        let (_dir, db) = test_db().await;
        seed_user(&db, "a@example.com", "Ana").await;
        seed_user(&db, "b@example.com", "Bruno").await;

        db.avaliations()
            .insert_if_absent(sample_review("a@example.com", "p1"))
            .await
            .unwrap();
        db.avaliations()
            .insert_if_absent(sample_review("b@example.com", "p1"))
            .await
            .unwrap();
        db.avaliations()
            .insert_if_absent(sample_review("a@example.com", "p2"))
            .await
            .unwrap();

        let reviews = db.avaliations().list_for_place("p1").await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].name, "Ana");
        assert_eq!(reviews[0].place_id, "p1");
        assert!(reviews[0].profile_img.contains("gravatar"));
    }

    #[tokio::test]
    async fn test_list_matches_reviewer_email_case_insensitively() {
        let (_dir, db) = test_db().await;
        seed_user(&db, "a@example.com", "Ana").await;

        db.avaliations()
            .insert_if_absent(sample_review("A@Example.COM", "p1"))
            .await
            .unwrap();

        let reviews = db.avaliations().list_for_place("p1").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_uniqueness_ignores_email_case() {
        let (_dir, db) = test_db().await;

        assert!(db
            .avaliations()
            .insert_if_absent(sample_review("a@example.com", "p1"))
            .await
            .unwrap());
        assert!(!db
            .avaliations()
            .insert_if_absent(sample_review("A@EXAMPLE.COM", "p1"))
            .await
            .unwrap());
    }
}
