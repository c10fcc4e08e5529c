//! Repository for the `project_templates` table.

use sqlx::PgPool;
use taskboard_core::types::DbId;

use crate::models::template::{ProjectTemplate, TemplateDocuments};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, default_options, epic_statuses, \
     us_statuses, points, task_statuses, issue_statuses, issue_types, priorities, \
     severities, roles, created_at, updated_at";

/// Provides CRUD operations for project templates.
///
/// Documents are written as given; callers resolve defaults and validate
/// their shape beforehand.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template. `None` documents take the column defaults.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: &str,
        description: Option<&str>,
        documents: &TemplateDocuments,
    ) -> Result<ProjectTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_templates
                (name, slug, description, default_options, epic_statuses, us_statuses, points,
                 task_statuses, issue_statuses, issue_types, priorities, severities, roles)
             VALUES ($1, $2, COALESCE($3, ''),
                 COALESCE($4, '{{}}'::jsonb), COALESCE($5, '[]'::jsonb), COALESCE($6, '[]'::jsonb),
                 COALESCE($7, '[]'::jsonb), COALESCE($8, '[]'::jsonb), COALESCE($9, '[]'::jsonb),
                 COALESCE($10, '[]'::jsonb), COALESCE($11, '[]'::jsonb), COALESCE($12, '[]'::jsonb),
                 COALESCE($13, '[]'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectTemplate>(&query)
            .bind(name)
            .bind(slug)
            .bind(description)
            .bind(&documents.default_options)
            .bind(&documents.epic_statuses)
            .bind(&documents.us_statuses)
            .bind(&documents.points)
            .bind(&documents.task_statuses)
            .bind(&documents.issue_statuses)
            .bind(&documents.issue_types)
            .bind(&documents.priorities)
            .bind(&documents.severities)
            .bind(&documents.roles)
            .fetch_one(pool)
            .await
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_templates WHERE id = $1");
        sqlx::query_as::<_, ProjectTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all templates by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_templates ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, ProjectTemplate>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a template. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        description: Option<&str>,
        documents: &TemplateDocuments,
    ) -> Result<Option<ProjectTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE project_templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                default_options = COALESCE($4, default_options),
                epic_statuses = COALESCE($5, epic_statuses),
                us_statuses = COALESCE($6, us_statuses),
                points = COALESCE($7, points),
                task_statuses = COALESCE($8, task_statuses),
                issue_statuses = COALESCE($9, issue_statuses),
                issue_types = COALESCE($10, issue_types),
                priorities = COALESCE($11, priorities),
                severities = COALESCE($12, severities),
                roles = COALESCE($13, roles)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectTemplate>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(&documents.default_options)
            .bind(&documents.epic_statuses)
            .bind(&documents.us_statuses)
            .bind(&documents.points)
            .bind(&documents.task_statuses)
            .bind(&documents.issue_statuses)
            .bind(&documents.issue_types)
            .bind(&documents.priorities)
            .bind(&documents.severities)
            .bind(&documents.roles)
            .fetch_optional(pool)
            .await
    }
}
