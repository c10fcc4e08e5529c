//! Handlers for the `/project-templates` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::naming::slugify;
use taskboard_core::types::DbId;
use taskboard_core::validation::project::validate_role_permissions;
use taskboard_core::validation::template::{document_or_default, template_entries, DEFAULT_OPTIONS};
use taskboard_db::models::template::{
    CreateProjectTemplate, ProjectTemplate, TemplateDocuments, UpdateProjectTemplate,
};
use taskboard_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProjectTemplate",
        id,
    })
}

/// Check each supplied document's shape, and the permissions of template roles.
///
/// With `fill_defaults`, omitted documents become their empty default;
/// otherwise they stay `None` so an update leaves them untouched.
fn resolve_documents(
    documents: TemplateDocuments,
    fill_defaults: bool,
) -> Result<TemplateDocuments, CoreError> {
    let resolve = |field: &'static str, value: Option<serde_json::Value>| {
        if value.is_none() && !fill_defaults {
            return Ok(None);
        }
        document_or_default(field, value).map(Some)
    };

    let resolved = TemplateDocuments {
        default_options: resolve(DEFAULT_OPTIONS, documents.default_options)?,
        epic_statuses: resolve("epic_statuses", documents.epic_statuses)?,
        us_statuses: resolve("us_statuses", documents.us_statuses)?,
        points: resolve("points", documents.points)?,
        task_statuses: resolve("task_statuses", documents.task_statuses)?,
        issue_statuses: resolve("issue_statuses", documents.issue_statuses)?,
        issue_types: resolve("issue_types", documents.issue_types)?,
        priorities: resolve("priorities", documents.priorities)?,
        severities: resolve("severities", documents.severities)?,
        roles: resolve("roles", documents.roles)?,
    };

    if let Some(roles) = &resolved.roles {
        for entry in template_entries(roles) {
            validate_role_permissions(&entry.permissions)?;
        }
    }
    Ok(resolved)
}

/// POST /api/v1/project-templates
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateProjectTemplate>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectTemplate>>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Template name must not be empty".into()));
    }
    let documents = resolve_documents(input.documents, true)?;

    let template = TemplateRepo::create(
        &state.pool,
        name,
        &slugify(name),
        input.description.as_deref(),
        &documents,
    )
    .await?;

    tracing::info!(template_id = template.id, user_id = admin.user_id, "Project template created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /api/v1/project-templates
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ProjectTemplate>>>> {
    let templates = TemplateRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /api/v1/project-templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectTemplate>>> {
    let template = TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: template }))
}

/// PUT /api/v1/project-templates/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectTemplate>,
) -> AppResult<Json<DataResponse<ProjectTemplate>>> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Template name must not be empty".into()));
    }
    let documents = resolve_documents(input.documents, false)?;

    let template = TemplateRepo::update(
        &state.pool,
        id,
        input.name.as_deref().map(str::trim),
        input.description.as_deref(),
        &documents,
    )
    .await?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(template_id = id, user_id = admin.user_id, "Project template updated");
    Ok(Json(DataResponse { data: template }))
}
