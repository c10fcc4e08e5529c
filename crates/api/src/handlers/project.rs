//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use taskboard_core::error::CoreError;
use taskboard_core::naming::normalize_tags;
use taskboard_core::types::DbId;
use taskboard_core::validation::bulk::{validate_project_order, ProjectOrderItem};
use taskboard_core::validation::project::validate_project_permissions;
use taskboard_core::validation::RuleViolation;
use taskboard_db::models::history::{project_key, CreateHistoryEntry, ENTRY_CHANGE};
use taskboard_db::models::project::{
    CreateProject, NewProject, Project, ProjectSeed, UpdateProject,
};
use taskboard_db::repositories::{MembershipRepo, ProjectRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{history, require_member};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// Fields tracked in project history diffs.
const TRACKED_FIELDS: [&str; 6] = [
    "name",
    "description",
    "is_private",
    "anon_permissions",
    "public_permissions",
    "tags",
];

fn snapshot(project: &Project) -> AppResult<Value> {
    serde_json::to_value(project).map_err(|e| AppError::InternalError(e.to_string()))
}

/// `{field: [before, after]}` for every tracked field that changed.
fn diff(before: &Value, after: &Value) -> Option<Value> {
    let changes: serde_json::Map<String, Value> = TRACKED_FIELDS
        .iter()
        .filter(|field| before[**field] != after[**field])
        .map(|field| (field.to_string(), json!([before[*field], after[*field]])))
        .collect();
    (!changes.is_empty()).then_some(Value::Object(changes))
}

/// POST /api/v1/projects
///
/// The caller becomes the owner and first admin member. Roles and options
/// are seeded from `template_id` when given. The creation history entry is
/// written in the same transaction as the project.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Project name must not be empty".into()));
    }
    validate_project_permissions(
        input.anon_permissions.as_deref(),
        input.public_permissions.as_deref(),
    )?;

    let template = match input.template_id {
        Some(template_id) => Some(
            TemplateRepo::find_by_id(&state.pool, template_id)
                .await?
                .ok_or(CoreError::Rule(RuleViolation::ReferenceNotFound {
                    field: "template_id",
                    entity: "project template",
                }))?,
        ),
        None => None,
    };
    let seed = ProjectSeed::from_template(template.as_ref());

    let new_project = NewProject {
        name: name.to_string(),
        description: input.description.unwrap_or_default(),
        owner_id: auth.user_id,
        is_private: input.is_private.unwrap_or(true),
        anon_permissions: input.anon_permissions.unwrap_or_default(),
        public_permissions: input.public_permissions.unwrap_or_default(),
        tags: normalize_tags(&input.tags),
    };
    let project = ProjectRepo::create_with_owner(&state.pool, &new_project, &seed).await?;

    tracing::info!(
        project_id = project.id,
        owner_id = auth.user_id,
        template_id = ?input.template_id,
        "Project created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
///
/// The caller's projects, in the caller's own order.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_for_member(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
///
/// Private projects are only visible to their members.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if project.is_private {
        require_member(&state.pool, id, auth.user_id, false).await?;
    }
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let before = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    require_member(&state.pool, id, auth.user_id, true).await?;

    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Project name must not be empty".into()));
    }
    validate_project_permissions(
        input.anon_permissions.as_deref(),
        input.public_permissions.as_deref(),
    )?;
    input.tags = input.tags.as_deref().map(normalize_tags);

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    let after = snapshot(&project)?;
    if let Some(diff) = diff(&snapshot(&before)?, &after) {
        history::record(
            &state.pool,
            CreateHistoryEntry {
                key: project_key(id),
                entry_type: Some(ENTRY_CHANGE),
                user_id: Some(auth.user_id),
                diff: Some(diff),
                snapshot: Some(after),
                ..Default::default()
            },
        )
        .await?;
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// Result of a bulk reorder.
#[derive(Debug, Serialize)]
pub struct BulkOrderResult {
    pub updated: u64,
}

/// POST /api/v1/projects/bulk-update-order
///
/// Every pair is validated before anything is written; the orders are then
/// stored on the caller's memberships in one transaction.
pub async fn bulk_update_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(items): Json<Vec<ProjectOrderItem>>,
) -> AppResult<Json<DataResponse<BulkOrderResult>>> {
    let rules = state.rules();
    for item in &items {
        validate_project_order(&rules, item).await?;
    }

    let updated = MembershipRepo::update_user_order_bulk(&state.pool, auth.user_id, &items).await?;

    tracing::info!(
        user_id = auth.user_id,
        requested = items.len(),
        updated,
        "Project order updated",
    );
    Ok(Json(DataResponse {
        data: BulkOrderResult { updated },
    }))
}
