//! Project template model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `project_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectTemplate {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub default_options: serde_json::Value,
    pub epic_statuses: serde_json::Value,
    pub us_statuses: serde_json::Value,
    pub points: serde_json::Value,
    pub task_statuses: serde_json::Value,
    pub issue_statuses: serde_json::Value,
    pub issue_types: serde_json::Value,
    pub priorities: serde_json::Value,
    pub severities: serde_json::Value,
    pub roles: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectTemplate {
    /// Look up a list document by its key.
    pub fn document(&self, field: &str) -> Option<&serde_json::Value> {
        match field {
            "epic_statuses" => Some(&self.epic_statuses),
            "us_statuses" => Some(&self.us_statuses),
            "points" => Some(&self.points),
            "task_statuses" => Some(&self.task_statuses),
            "issue_statuses" => Some(&self.issue_statuses),
            "issue_types" => Some(&self.issue_types),
            "priorities" => Some(&self.priorities),
            "severities" => Some(&self.severities),
            "roles" => Some(&self.roles),
            _ => None,
        }
    }
}

/// Template documents as supplied by the client. Omitted documents are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateDocuments {
    pub default_options: Option<serde_json::Value>,
    pub epic_statuses: Option<serde_json::Value>,
    pub us_statuses: Option<serde_json::Value>,
    pub points: Option<serde_json::Value>,
    pub task_statuses: Option<serde_json::Value>,
    pub issue_statuses: Option<serde_json::Value>,
    pub issue_types: Option<serde_json::Value>,
    pub priorities: Option<serde_json::Value>,
    pub severities: Option<serde_json::Value>,
    pub roles: Option<serde_json::Value>,
}

/// DTO for creating a template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectTemplate {
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub documents: TemplateDocuments,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectTemplate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub documents: TemplateDocuments,
}
