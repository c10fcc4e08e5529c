//! Repository for the `users` table.

use sqlx::PgPool;
use taskboard_core::naming::normalize_email;
use taskboard_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, full_name, is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. The email is stored lowercased.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, full_name)
             VALUES ($1, $2, COALESCE($3, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(normalize_email(&input.email))
            .bind(&input.full_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the active flag. Returns `true` if the user exists.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active users sharing at least one project with `user_id`.
    pub async fn list_contacts(pool: &PgPool, user_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE is_active
               AND id <> $1
               AND id IN (
                   SELECT theirs.user_id
                   FROM memberships mine
                   JOIN memberships theirs ON theirs.project_id = mine.project_id
                   WHERE mine.user_id = $1 AND theirs.user_id IS NOT NULL
               )
             ORDER BY username ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
