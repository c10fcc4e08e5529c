//! Handlers for project-scoped options, mounted at
//! `/projects/{project_id}/options/{kind}`.
//!
//! One set of handlers serves every [`OptionKind`]; the kind comes from the
//! path and selects the backing table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_core::validation::options::{validate_unique_option_name, ScopedRecordRef};
use taskboard_core::validation::project::validate_project_exists;
use taskboard_core::validation::{OptionKind, WriteOp};
use taskboard_db::models::project_option::{
    CreateProjectOption, ProjectOption, UpdateProjectOption,
};
use taskboard_db::repositories::ProjectOptionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::require_member;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_scoped(
    state: &AppState,
    kind: OptionKind,
    project_id: DbId,
    id: DbId,
) -> AppResult<ProjectOption> {
    ProjectOptionRepo::find_by_id(&state.pool, kind, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))
}

/// GET /api/v1/projects/{project_id}/options/{kind}
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, kind)): Path<(DbId, OptionKind)>,
) -> AppResult<Json<DataResponse<Vec<ProjectOption>>>> {
    validate_project_exists(&state.rules(), project_id).await?;
    require_member(&state.pool, project_id, auth.user_id, false).await?;

    let options = ProjectOptionRepo::list_by_project(&state.pool, kind, project_id).await?;
    Ok(Json(DataResponse { data: options }))
}

/// POST /api/v1/projects/{project_id}/options/{kind}
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, kind)): Path<(DbId, OptionKind)>,
    Json(input): Json<CreateProjectOption>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectOption>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".into()));
    }
    let rules = state.rules();
    validate_project_exists(&rules, project_id).await?;
    require_member(&state.pool, project_id, auth.user_id, true).await?;
    validate_unique_option_name(
        &rules,
        kind,
        WriteOp::Create,
        Some(project_id),
        Some(&input.name),
    )
    .await?;

    let option = ProjectOptionRepo::create(&state.pool, kind, project_id, &input).await?;

    tracing::info!(
        kind = kind.table(),
        option_id = option.id,
        project_id,
        "Project option created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: option })))
}

/// PUT /api/v1/projects/{project_id}/options/{kind}/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, kind, id)): Path<(DbId, OptionKind, DbId)>,
    Json(input): Json<UpdateProjectOption>,
) -> AppResult<Json<DataResponse<ProjectOption>>> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Name must not be empty".into()));
    }
    let existing = find_scoped(&state, kind, project_id, id).await?;
    require_member(&state.pool, project_id, auth.user_id, true).await?;
    validate_unique_option_name(
        &state.rules(),
        kind,
        WriteOp::Update(ScopedRecordRef {
            id: existing.id,
            project_id: existing.project_id,
        }),
        None,
        input.name.as_deref(),
    )
    .await?;

    let option = ProjectOptionRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))?;

    tracing::info!(kind = kind.table(), option_id = id, project_id, "Project option updated");
    Ok(Json(DataResponse { data: option }))
}

/// DELETE /api/v1/projects/{project_id}/options/{kind}/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, kind, id)): Path<(DbId, OptionKind, DbId)>,
) -> AppResult<StatusCode> {
    find_scoped(&state, kind, project_id, id).await?;
    require_member(&state.pool, project_id, auth.user_id, true).await?;

    ProjectOptionRepo::delete(&state.pool, kind, id).await?;
    tracing::info!(kind = kind.table(), option_id = id, project_id, "Project option deleted");
    Ok(StatusCode::NO_CONTENT)
}
