//! Favorites repository
//!
//! A favorite is a (user, place) pair with toggle semantics: the first call
//! for a pair creates it, the second deletes it. The UNIQUE constraint on
//! (user_id, place_id) resolves concurrent duplicate inserts.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool as Pool;
#[cfg(feature = "postgres")]
use sqlx::PgPool as Pool;

use super::sqlite_helpers::now_iso8601;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: String,
    pub user_id: String,
    pub place_id: String,
    pub place_name: String,
    pub place_icon: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateFavorite {
    pub user_id: String,
    pub place_id: String,
    pub place_name: String,
    pub place_icon: Option<String>,
}

pub struct FavoritesRepository {
    pool: Pool,
}

impl FavoritesRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert a favorite unless the (user, place) pair already exists.
    ///
    /// Returns true if a row was created. A conflicting concurrent insert
    /// leaves the existing row untouched and returns false.
    pub async fn insert_if_absent(&self, favorite: CreateFavorite) -> Result<bool> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        let result = sqlx::query(
            r#"
            INSERT INTO favorites (id, user_id, place_id, place_name, place_icon, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, place_id) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(&favorite.user_id)
        .bind(&favorite.place_id)
        .bind(&favorite.place_name)
        .bind(&favorite.place_icon)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the favorite for a (user, place) pair
    pub async fn delete_by_user_and_place(&self, user_id: &str, place_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND place_id = ?")
            .bind(user_id)
            .bind(place_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get the favorite for a (user, place) pair
    pub async fn get_by_user_and_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<FavoriteRecord>> {
        let row = sqlx::query_as::<_, (String, String, String, String, Option<String>, String)>(
            "SELECT id, user_id, place_id, place_name, place_icon, created_at FROM favorites WHERE user_id = ? AND place_id = ?"
        )
        .bind(user_id)
        .bind(place_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| FavoriteRecord {
            id: r.0,
            user_id: r.1,
            place_id: r.2,
            place_name: r.3,
            place_icon: r.4,
            created_at: r.5,
        }))
    }

    /// List all favorites for a user, oldest first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<FavoriteRecord>> {
        let rows = sqlx::query_as::<_, (String, String, String, String, Option<String>, String)>(
            "SELECT id, user_id, place_id, place_name, place_icon, created_at FROM favorites WHERE user_id = ? ORDER BY created_at"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| FavoriteRecord {
                id: r.0,
                user_id: r.1,
                place_id: r.2,
                place_name: r.3,
                place_icon: r.4,
                created_at: r.5,
            })
            .collect())
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

    // The user_id foreign key is enforced, so every test favorite needs a
    // real account behind it.
    async fn seed_user(db: &Database, email: &str) -> String {
        let outcome = db
            .users()
            .create(crate::db::CreateUser {
                email: email.to_string(),
                name: "Test User".to_string(),
                password_hash: "$2b$12$hash".to_string(),
                profile_img: "https://s.gravatar.com/avatar/x".to_string(),
            })
            .await
            .unwrap();
        match outcome {
            crate::db::CreateUserOutcome::Created(user) => user.id,
            crate::db::CreateUserOutcome::DuplicateEmail => panic!("seed user already exists"),
        }
    }

    fn sample_favorite(user_id: &str, place_id: &str) -> CreateFavorite {
        CreateFavorite {
            user_id: user_id.to_string(),
            place_id: place_id.to_string(),
            place_name: "Cafe Central".to_string(),
            place_icon: None,
        }
    }

    #[tokio::test]
    async fn test_second_insert_for_same_pair_is_rejected() {
        let (_dir, db) = test_db().await;
        let user_id = seed_user(&db, "u1@example.com").await;

        assert!(db
            .favorites()
            .insert_if_absent(sample_favorite(&user_id, "p1"))
            .await
            .unwrap());
        assert!(!db
            .favorites()
            .insert_if_absent(sample_favorite(&user_id, "p1"))
            .await
            .unwrap());

        assert_eq!(db.favorites().list_for_user(&user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_cycle() {
        let (_dir, db) = test_db().await;
        let user_id = seed_user(&db, "u1@example.com").await;

        assert!(db
            .favorites()
            .insert_if_absent(sample_favorite(&user_id, "p1"))
            .await
            .unwrap());
        assert!(db
            .favorites()
            .delete_by_user_and_place(&user_id, "p1")
            .await
            .unwrap());
        assert!(db
            .favorites()
            .get_by_user_and_place(&user_id, "p1")
            .await
            .unwrap()
            .is_none());

        // A fresh insert after removal starts the cycle over
        assert!(db
            .favorites()
            .insert_if_absent(sample_favorite(&user_id, "p1"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_pair_reports_false() {
        let (_dir, db) = test_db().await;
        let user_id = seed_user(&db, "u1@example.com").await;
        assert!(!db
            .favorites()
            .delete_by_user_and_place(&user_id, "p1")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let (_dir, db) = test_db().await;
        let first = seed_user(&db, "u1@example.com").await;
        let second = seed_user(&db, "u2@example.com").await;

        db.favorites()
            .insert_if_absent(sample_favorite(&first, "p1"))
            .await
            .unwrap();
        db.favorites()
            .insert_if_absent(sample_favorite(&first, "p2"))
            .await
            .unwrap();
        db.favorites()
            .insert_if_absent(sample_favorite(&second, "p1"))
            .await
            .unwrap();

        let list = db.favorites().list_for_user(&first).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|f| f.user_id == first));
    }
}
