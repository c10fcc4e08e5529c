//! Repository for the `projects` table.

use sqlx::{PgConnection, PgPool};
use taskboard_core::naming::slugify;
use taskboard_core::types::DbId;

use crate::models::history::{project_key, CreateHistoryEntry, ENTRY_CREATE};
use crate::models::project::{NewProject, Project, ProjectSeed, UpdateProject};
use crate::models::role::CreateRole;
use crate::repositories::history_repo::HistoryRepo;
use crate::repositories::project_option_repo::ProjectOptionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, owner_id, anon_permissions, \
     public_permissions, tags, is_private, blocked_code, created_at, updated_at";

/// [`COLUMNS`] qualified with the `p` alias, for joins.
const PREFIXED_COLUMNS: &str = "p.id, p.name, p.slug, p.description, p.owner_id, \
     p.anon_permissions, p.public_permissions, p.tags, p.is_private, p.blocked_code, \
     p.created_at, p.updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project together with its seed roles, seed options, the
    /// owner's admin membership and its creation history entry, all in one
    /// transaction.
    ///
    /// The owner membership takes the first seeded role. An empty role seed
    /// is replaced by [`CreateRole::fallback`].
    pub async fn create_with_owner(
        pool: &PgPool,
        input: &NewProject,
        seed: &ProjectSeed,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let slug = Self::free_slug(&mut *tx, &slugify(&input.name)).await?;
        let query = format!(
            "INSERT INTO projects
                (name, slug, description, owner_id, anon_permissions, public_permissions, tags, is_private)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(input.owner_id)
            .bind(&input.anon_permissions)
            .bind(&input.public_permissions)
            .bind(&input.tags)
            .bind(input.is_private)
            .fetch_one(&mut *tx)
            .await?;

        let fallback = [CreateRole::fallback()];
        let roles: &[CreateRole] = if seed.roles.is_empty() {
            &fallback
        } else {
            &seed.roles
        };

        let mut owner_role_id = None;
        for role in roles {
            let role_id: DbId = sqlx::query_scalar(
                "INSERT INTO roles (project_id, name, slug, permissions, sort_order)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id",
            )
            .bind(project.id)
            .bind(&role.name)
            .bind(slugify(&role.name))
            .bind(&role.permissions)
            .bind(role.sort_order)
            .fetch_one(&mut *tx)
            .await?;
            owner_role_id.get_or_insert(role_id);
        }

        for (kind, items) in &seed.options {
            for item in items {
                ProjectOptionRepo::create_in(&mut *tx, *kind, project.id, item).await?;
            }
        }

        sqlx::query(
            "INSERT INTO memberships (project_id, user_id, role_id, is_admin)
             VALUES ($1, $2, $3, TRUE)",
        )
        .bind(project.id)
        .bind(input.owner_id)
        .bind(owner_role_id)
        .execute(&mut *tx)
        .await?;

        let snapshot =
            serde_json::to_value(&project).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let entry = CreateHistoryEntry {
            key: project_key(project.id),
            entry_type: Some(ENTRY_CREATE),
            user_id: Some(input.owner_id),
            snapshot: Some(snapshot),
            ..Default::default()
        };
        HistoryRepo::create_in(&mut *tx, &entry).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Return `base`, or `base-N` for the first N that is not taken.
    async fn free_slug(conn: &mut PgConnection, base: &str) -> Result<String, sqlx::Error> {
        let mut candidate = base.to_string();
        let mut n = 1;
        loop {
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE slug = $1)")
                    .bind(&candidate)
                    .fetch_one(&mut *conn)
                    .await?;
            if !taken {
                return Ok(candidate);
            }
            n += 1;
            candidate = format!("{base}-{n}");
        }
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the projects `user_id` is a member of, in the user's own order.
    pub async fn list_for_member(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS} FROM projects p
             JOIN memberships m ON m.project_id = p.id
             WHERE m.user_id = $1
             ORDER BY m.user_order ASC, p.id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// The slug is kept stable across renames. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_private = COALESCE($4, is_private),
                anon_permissions = COALESCE($5, anon_permissions),
                public_permissions = COALESCE($6, public_permissions),
                tags = COALESCE($7, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_private)
            .bind(&input.anon_permissions)
            .bind(&input.public_permissions)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }
}
