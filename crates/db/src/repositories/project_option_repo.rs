//! Repository for the project-scoped option tables.
//!
//! All option kinds share one row shape; the table is picked from
//! [`OptionKind::table`], which only ever yields fixed identifiers.

use sqlx::{PgConnection, PgPool};
use taskboard_core::types::DbId;
use taskboard_core::validation::OptionKind;

use crate::models::project_option::{CreateProjectOption, ProjectOption, UpdateProjectOption};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, sort_order, color, created_at, updated_at";

fn insert_query(kind: OptionKind) -> String {
    format!(
        "INSERT INTO {table} (project_id, name, sort_order, color)
         VALUES ($1, $2, COALESCE($3, 10), COALESCE($4, '#999999'))
         RETURNING {COLUMNS}",
        table = kind.table()
    )
}

/// Provides CRUD operations for project-scoped options.
pub struct ProjectOptionRepo;

impl ProjectOptionRepo {
    /// Insert a new option, returning the created row.
    pub async fn create(
        pool: &PgPool,
        kind: OptionKind,
        project_id: DbId,
        input: &CreateProjectOption,
    ) -> Result<ProjectOption, sqlx::Error> {
        sqlx::query_as::<_, ProjectOption>(&insert_query(kind))
            .bind(project_id)
            .bind(&input.name)
            .bind(input.sort_order)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Insert an option on an open connection (used inside transactions).
    pub(crate) async fn create_in(
        conn: &mut PgConnection,
        kind: OptionKind,
        project_id: DbId,
        input: &CreateProjectOption,
    ) -> Result<ProjectOption, sqlx::Error> {
        sqlx::query_as::<_, ProjectOption>(&insert_query(kind))
            .bind(project_id)
            .bind(&input.name)
            .bind(input.sort_order)
            .bind(&input.color)
            .fetch_one(conn)
            .await
    }

    /// Find an option by ID within its project.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: OptionKind,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<ProjectOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE id = $1 AND project_id = $2",
            table = kind.table()
        );
        sqlx::query_as::<_, ProjectOption>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's options in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        kind: OptionKind,
        project_id: DbId,
    ) -> Result<Vec<ProjectOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE project_id = $1 ORDER BY sort_order ASC, id ASC",
            table = kind.table()
        );
        sqlx::query_as::<_, ProjectOption>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update an option. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        kind: OptionKind,
        id: DbId,
        input: &UpdateProjectOption,
    ) -> Result<Option<ProjectOption>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET
                name = COALESCE($2, name),
                sort_order = COALESCE($3, sort_order),
                color = COALESCE($4, color)
             WHERE id = $1
             RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, ProjectOption>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.sort_order)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete an option. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, kind: OptionKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {table} WHERE id = $1", table = kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
