//! Postgres implementation of the integrity-rule queries.

use async_trait::async_trait;
use sqlx::PgPool;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_core::validation::{OptionKind, ProjectRef, RuleStore, UserRef};

/// [`RuleStore`] backed by a connection pool. Read-only.
#[derive(Clone)]
pub struct PgRuleStore {
    pool: PgPool,
}

impl PgRuleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Rule lookup failed");
    CoreError::Internal(format!("Database error: {err}"))
}

#[async_trait]
impl RuleStore for PgRuleStore {
    async fn project_exists(&self, project_id: DbId) -> Result<bool, CoreError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn find_project(&self, project_id: DbId) -> Result<Option<ProjectRef>, CoreError> {
        let row: Option<(DbId, DbId)> =
            sqlx::query_as("SELECT id, owner_id FROM projects WHERE id = $1")
                .bind(project_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(internal)?;
        Ok(row.map(|(id, owner_id)| ProjectRef { id, owner_id }))
    }

    async fn find_user(&self, user_id: DbId) -> Result<Option<UserRef>, CoreError> {
        let row: Option<(DbId, String, bool)> =
            sqlx::query_as("SELECT id, email, is_active FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(internal)?;
        Ok(row.map(|(id, email, is_active)| UserRef {
            id,
            email,
            is_active,
        }))
    }

    async fn option_name_taken(
        &self,
        kind: OptionKind,
        project_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, CoreError> {
        let query = format!(
            "SELECT EXISTS (
                 SELECT 1 FROM {table}
                 WHERE project_id = $1 AND name = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
            table = kind.table()
        );
        sqlx::query_scalar(&query)
            .bind(project_id)
            .bind(name)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn membership_email_taken(
        &self,
        project_id: DbId,
        email: &str,
        exclude_membership_id: Option<DbId>,
    ) -> Result<bool, CoreError> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM memberships m
                 LEFT JOIN users u ON u.id = m.user_id
                 WHERE m.project_id = $1
                   AND (LOWER(m.email) = $2 OR LOWER(u.email) = $2)
                   AND ($3::BIGINT IS NULL OR m.id <> $3)
             )",
        )
        .bind(project_id)
        .bind(email)
        .bind(exclude_membership_id)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)
    }

    async fn is_visible_contact(&self, actor_id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM memberships mine
                 JOIN memberships theirs ON theirs.project_id = mine.project_id
                 JOIN users u ON u.id = theirs.user_id
                 WHERE mine.user_id = $1 AND theirs.user_id = $2 AND u.is_active
             )",
        )
        .bind(actor_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)
    }

    async fn role_in_project(&self, role_id: DbId, project_id: DbId) -> Result<bool, CoreError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM roles WHERE id = $1 AND project_id = $2)")
            .bind(role_id)
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn project_role_ids(
        &self,
        project_id: DbId,
        role_ids: &[DbId],
    ) -> Result<Vec<DbId>, CoreError> {
        sqlx::query_scalar("SELECT id FROM roles WHERE project_id = $1 AND id = ANY($2)")
            .bind(project_id)
            .bind(role_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(internal)
    }

    async fn has_other_active_admin(
        &self,
        project_id: DbId,
        exclude_user_id: DbId,
    ) -> Result<bool, CoreError> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM memberships m
                 JOIN users u ON u.id = m.user_id
                 WHERE m.project_id = $1 AND m.is_admin AND u.is_active AND m.user_id <> $2
             )",
        )
        .bind(project_id)
        .bind(exclude_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)
    }
}
