//! Role entity model.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A role row from the `roles` table. Roles belong to exactly one project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub slug: String,
    pub permissions: Vec<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a role; roles are seeded with their project.
#[derive(Debug, Clone)]
pub struct CreateRole {
    pub name: String,
    pub permissions: Vec<String>,
    pub sort_order: i32,
}

impl CreateRole {
    /// Name of the role a project gets when nothing else seeds one.
    pub const FALLBACK_NAME: &'static str = "Owner";

    /// The role used when a project is created without template roles.
    pub fn fallback() -> Self {
        Self {
            name: Self::FALLBACK_NAME.to_string(),
            permissions: taskboard_core::permissions::MEMBER_PERMISSIONS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            sort_order: 10,
        }
    }
}
