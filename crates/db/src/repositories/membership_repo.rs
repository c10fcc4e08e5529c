//! Repository for the `memberships` table.

use sqlx::PgPool;
use taskboard_core::naming::normalize_email;
use taskboard_core::types::DbId;
use taskboard_core::validation::bulk::ProjectOrderItem;

use crate::models::membership::{BulkMembershipEntry, Membership, NewMembership, UpdateMembership};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, email, role_id, is_admin, invited_by_id, \
     invitation_extra_text, user_order, created_at, updated_at";

/// Provides CRUD operations for memberships.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Insert a new membership, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewMembership) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships
                (project_id, user_id, email, role_id, is_admin, invited_by_id, invitation_extra_text)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(input.email.as_deref().map(normalize_email))
            .bind(input.role_id)
            .bind(input.is_admin)
            .bind(input.invited_by_id)
            .bind(&input.invitation_extra_text)
            .fetch_one(pool)
            .await
    }

    /// Find a membership by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM memberships WHERE id = $1");
        sqlx::query_as::<_, Membership>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find `user_id`'s membership in a project.
    pub async fn find_for_user(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM memberships WHERE project_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Membership>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's memberships, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships WHERE project_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a membership. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMembership,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "UPDATE memberships SET
                role_id = COALESCE($2, role_id),
                is_admin = COALESCE($3, is_admin)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(id)
            .bind(input.role_id)
            .bind(input.is_admin)
            .fetch_optional(pool)
            .await
    }

    /// Create pending invitations for a batch within one transaction.
    ///
    /// Emails that already belong to the project, directly or through a
    /// member user, are skipped. Returns the rows actually inserted.
    pub async fn bulk_invite(
        pool: &PgPool,
        project_id: DbId,
        entries: &[BulkMembershipEntry],
        invited_by_id: Option<DbId>,
        invitation_extra_text: Option<&str>,
    ) -> Result<Vec<Membership>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(entries.len());

        let query = format!(
            "INSERT INTO memberships
                (project_id, email, role_id, is_admin, invited_by_id, invitation_extra_text)
             SELECT $1, $2, $3, FALSE, $4, $5
             WHERE NOT EXISTS (
                 SELECT 1 FROM memberships m
                 LEFT JOIN users u ON u.id = m.user_id
                 WHERE m.project_id = $1 AND (m.email = $2 OR LOWER(u.email) = $2)
             )
             RETURNING {COLUMNS}"
        );

        for entry in entries {
            let row = sqlx::query_as::<_, Membership>(&query)
                .bind(project_id)
                .bind(normalize_email(&entry.email))
                .bind(entry.role_id)
                .bind(invited_by_id)
                .bind(invitation_extra_text)
                .fetch_optional(&mut *tx)
                .await?;
            created.extend(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Store a user's personal project ordering within one transaction.
    ///
    /// Pairs for projects the user is not a member of are ignored. Returns
    /// the number of memberships updated.
    pub async fn update_user_order_bulk(
        pool: &PgPool,
        user_id: DbId,
        items: &[ProjectOrderItem],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;

        for item in items {
            let result = sqlx::query(
                "UPDATE memberships SET user_order = $3 WHERE project_id = $1 AND user_id = $2",
            )
            .bind(item.project_id)
            .bind(user_id)
            .bind(item.order)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }
}
