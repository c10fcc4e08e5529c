//! Handlers for project memberships and bulk invitations.
//!
//! Every write runs the membership rule set against the database before the
//! repository is called.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_core::validation::bulk::validate_members_bulk;
use taskboard_core::validation::membership::{
    MembershipAdminValidator, MembershipRef, MembershipValidator, MembershipWrite,
};
use taskboard_core::validation::{Actor, RuleViolation, WriteOp};
use taskboard_db::models::membership::{
    BulkMembershipRequest, CreateMembership, Membership, NewMembership, UpdateMembership,
};
use taskboard_db::repositories::{MembershipRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::require_member;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Membership",
        id,
    })
}

fn as_ref(membership: &Membership) -> MembershipRef {
    MembershipRef {
        id: membership.id,
        project_id: membership.project_id,
        user_id: membership.user_id,
    }
}

/// GET /api/v1/projects/{project_id}/memberships
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Membership>>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    require_member(&state.pool, project_id, auth.user_id, false).await?;

    let memberships = MembershipRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: memberships }))
}

/// POST /api/v1/projects/{project_id}/memberships
///
/// Adds an existing user, or invites an email that has no account yet.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMembership>,
) -> AppResult<(StatusCode, Json<DataResponse<Membership>>)> {
    input.validate()?;

    let actor = auth.actor();
    let write = MembershipWrite {
        project_id,
        user_id: input.user_id,
        email: input.email.as_deref(),
        role_id: input.role_id,
        is_admin: input.is_admin,
    };
    MembershipValidator
        .validate(&state.rules(), Some(&actor), WriteOp::Create, &write)
        .await?;
    require_member(&state.pool, project_id, auth.user_id, true).await?;

    let role_id = input
        .role_id
        .ok_or(CoreError::Rule(RuleViolation::MissingRole))?;
    let new_membership = NewMembership {
        project_id,
        user_id: input.user_id,
        email: input.email.clone(),
        role_id,
        is_admin: input.is_admin.unwrap_or(false),
        invited_by_id: Some(auth.user_id),
        invitation_extra_text: None,
    };
    let membership = MembershipRepo::create(&state.pool, &new_membership).await?;

    tracing::info!(
        membership_id = membership.id,
        project_id,
        user_id = ?membership.user_id,
        invited_by = auth.user_id,
        "Membership created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: membership })))
}

/// Validate and apply a membership update. Shared by the project-admin and
/// site-admin endpoints, which differ only in who may call them.
async fn apply_update(
    state: &AppState,
    actor: Option<&Actor>,
    existing: &Membership,
    input: &UpdateMembership,
) -> AppResult<Membership> {
    let write = MembershipWrite {
        project_id: existing.project_id,
        role_id: input.role_id,
        is_admin: input.is_admin,
        ..Default::default()
    };
    MembershipAdminValidator
        .validate(&state.rules(), actor, WriteOp::Update(as_ref(existing)), &write)
        .await?;

    let membership = MembershipRepo::update(&state.pool, existing.id, input)
        .await?
        .ok_or_else(|| not_found(existing.id))?;

    tracing::info!(
        membership_id = membership.id,
        project_id = membership.project_id,
        is_admin = membership.is_admin,
        role_id = membership.role_id,
        "Membership updated",
    );
    Ok(membership)
}

/// PUT /api/v1/memberships/{id}
///
/// Requires the caller to be an admin of the membership's project.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMembership>,
) -> AppResult<Json<DataResponse<Membership>>> {
    let existing = MembershipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    require_member(&state.pool, existing.project_id, auth.user_id, true).await?;

    let actor = auth.actor();
    let membership = apply_update(&state, Some(&actor), &existing, &input).await?;
    Ok(Json(DataResponse { data: membership }))
}

/// PUT /api/v1/admin/memberships/{id}
///
/// Site administrators may edit any membership.
pub async fn admin_update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMembership>,
) -> AppResult<Json<DataResponse<Membership>>> {
    let existing = MembershipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let actor = admin.actor();
    let membership = apply_update(&state, Some(&actor), &existing, &input).await?;
    Ok(Json(DataResponse { data: membership }))
}

/// POST /api/v1/memberships/bulk-create
///
/// Invites every email of the batch with its role. Emails that already
/// belong to the project are skipped; the created invitations are returned.
pub async fn bulk_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BulkMembershipRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Membership>>>)> {
    input.validate()?;

    let role_ids: Vec<DbId> = input.bulk_memberships.iter().map(|m| m.role_id).collect();
    validate_members_bulk(&state.rules(), input.project_id, &role_ids).await?;
    require_member(&state.pool, input.project_id, auth.user_id, true).await?;

    let created = MembershipRepo::bulk_invite(
        &state.pool,
        input.project_id,
        &input.bulk_memberships,
        Some(auth.user_id),
        input.invitation_extra_text.as_deref(),
    )
    .await?;

    tracing::info!(
        project_id = input.project_id,
        requested = input.bulk_memberships.len(),
        created = created.len(),
        "Bulk invitations created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
