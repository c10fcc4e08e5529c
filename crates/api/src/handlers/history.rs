//! Read access to history entries.

use axum::extract::{Path, State};
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::roles::ROLE_ADMIN;
use taskboard_db::models::history::{parse_project_key, CreateHistoryEntry, HistoryEntry};
use taskboard_db::repositories::{HistoryRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::require_member;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/history/{key}
///
/// Entries recorded under `key`, newest first. Missing documents are `null`.
///
/// A project key is readable by whoever may read the project itself. Any
/// other key is reserved to site administrators.
pub async fn list_by_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    match parse_project_key(&key) {
        Some(project_id) => {
            let project = ProjectRepo::find_by_id(&state.pool, project_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Project",
                    id: project_id,
                }))?;
            if project.is_private {
                require_member(&state.pool, project_id, auth.user_id, false).await?;
            }
        }
        None if auth.role == ROLE_ADMIN => {}
        None => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
    }

    let entries = HistoryRepo::list_by_key(&state.pool, &key).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// Record a history entry for a write that already succeeded.
pub(crate) async fn record(
    pool: &sqlx::PgPool,
    entry: CreateHistoryEntry,
) -> AppResult<HistoryEntry> {
    let entry = HistoryRepo::create(pool, &entry).await?;
    tracing::debug!(history_id = entry.id, key = %entry.key, "History entry recorded");
    Ok(entry)
}
