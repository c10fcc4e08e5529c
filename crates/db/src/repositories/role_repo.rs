//! Repository for the `roles` table.

use sqlx::PgPool;
use taskboard_core::types::DbId;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, name, slug, permissions, sort_order, created_at, updated_at";

/// Provides read operations for roles. Roles are created with their project.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's roles in display order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM roles WHERE project_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
