//! Project entity model and DTOs.
//!
//! `slug`, `owner_id`, `blocked_code` and the timestamps are server-managed:
//! the DTOs do not carry them, so client-supplied values are ignored.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};
use taskboard_core::validation::template::template_entries;
use taskboard_core::validation::OptionKind;

use crate::models::project_option::CreateProjectOption;
use crate::models::role::CreateRole;
use crate::models::template::ProjectTemplate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub owner_id: DbId,
    pub anon_permissions: Vec<String>,
    pub public_permissions: Vec<String>,
    pub tags: Vec<String>,
    pub is_private: bool,
    pub blocked_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    /// Seed roles and options from this template.
    pub template_id: Option<DbId>,
    pub is_private: Option<bool>,
    pub anon_permissions: Option<Vec<String>>,
    pub public_permissions: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
    pub anon_permissions: Option<Vec<String>>,
    pub public_permissions: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// Insert payload for a project, after validation and normalisation.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub owner_id: DbId,
    pub is_private: bool,
    pub anon_permissions: Vec<String>,
    pub public_permissions: Vec<String>,
    pub tags: Vec<String>,
}

/// Roles and options inserted together with a new project.
#[derive(Debug, Clone, Default)]
pub struct ProjectSeed {
    pub roles: Vec<CreateRole>,
    pub options: Vec<(OptionKind, Vec<CreateProjectOption>)>,
}

impl ProjectSeed {
    /// Build the seed from a template's documents, falling back to a single
    /// owner role when the template has none (or there is no template).
    pub fn from_template(template: Option<&ProjectTemplate>) -> Self {
        let entries = |field: &str| {
            template
                .and_then(|t| t.document(field))
                .map(template_entries)
                .unwrap_or_default()
        };

        let mut roles: Vec<CreateRole> = entries("roles")
            .into_iter()
            .enumerate()
            .map(|(i, entry)| CreateRole {
                name: entry.name,
                permissions: entry.permissions,
                sort_order: entry.order.unwrap_or((i as i32 + 1) * 10),
            })
            .collect();
        if roles.is_empty() {
            roles.push(CreateRole::fallback());
        }

        let options = OptionKind::ALL
            .into_iter()
            .map(|kind| {
                let items = entries(kind.template_field())
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| CreateProjectOption {
                        name: entry.name,
                        sort_order: Some(entry.order.unwrap_or((i as i32 + 1) * 10)),
                        color: entry.color,
                    })
                    .collect();
                (kind, items)
            })
            .collect();

        Self { roles, options }
    }
}
