//! Membership model and DTOs.
//!
//! A membership ties a user, or a pending invitee email, to a project with
//! a role and an admin flag.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `memberships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub email: Option<String>,
    pub role_id: DbId,
    pub is_admin: bool,
    pub invited_by_id: Option<DbId>,
    pub invitation_extra_text: Option<String>,
    pub user_order: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a membership. At least one of `user_id` / `email` is required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMembership {
    pub user_id: Option<DbId>,
    #[validate(email)]
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_admin: Option<bool>,
}

/// DTO for updating a membership. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMembership {
    pub role_id: Option<DbId>,
    pub is_admin: Option<bool>,
}

/// One invitation of a bulk request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkMembershipEntry {
    #[validate(email)]
    pub email: String,
    pub role_id: DbId,
}

/// Body of `POST /memberships/bulk-create`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkMembershipRequest {
    pub project_id: DbId,
    #[validate(nested)]
    pub bulk_memberships: Vec<BulkMembershipEntry>,
    #[validate(length(max = 255))]
    pub invitation_extra_text: Option<String>,
}

/// Insert payload for a membership, after validation and normalisation.
#[derive(Debug, Clone)]
pub struct NewMembership {
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub email: Option<String>,
    pub role_id: DbId,
    pub is_admin: bool,
    pub invited_by_id: Option<DbId>,
    pub invitation_extra_text: Option<String>,
}
