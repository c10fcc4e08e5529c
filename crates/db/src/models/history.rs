//! History entry model.
//!
//! `diff`, `snapshot` and `values` are nullable JSONB documents; a missing
//! document is `None`, never an empty string.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// `entry_type` of an entry recording a modification.
pub const ENTRY_CHANGE: i16 = 1;
/// `entry_type` of an entry recording a creation.
pub const ENTRY_CREATE: i16 = 2;

const PROJECT_KEY_PREFIX: &str = "projects.project:";

/// History key of a project: `projects.project:{id}`.
pub fn project_key(project_id: DbId) -> String {
    format!("{PROJECT_KEY_PREFIX}{project_id}")
}

/// The project id of a key built by [`project_key`].
pub fn parse_project_key(key: &str) -> Option<DbId> {
    key.strip_prefix(PROJECT_KEY_PREFIX)?.parse().ok()
}

/// A row from the `history_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub key: String,
    pub entry_type: i16,
    pub user_id: Option<DbId>,
    pub diff: Option<serde_json::Value>,
    pub snapshot: Option<serde_json::Value>,
    pub values: Option<serde_json::Value>,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a history entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHistoryEntry {
    pub key: String,
    pub entry_type: Option<i16>,
    pub user_id: Option<DbId>,
    pub diff: Option<serde_json::Value>,
    pub snapshot: Option<serde_json::Value>,
    pub values: Option<serde_json::Value>,
    pub comment: Option<String>,
}
