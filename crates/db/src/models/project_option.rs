//! Project-scoped option model (statuses, types, severities, priorities, points).
//!
//! Every kind lives in its own table but shares this row shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from any of the option tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectOption {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub sort_order: i32,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an option.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectOption {
    pub name: String,
    pub sort_order: Option<i32>,
    pub color: Option<String>,
}

/// DTO for updating an option. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectOption {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub color: Option<String>,
}
