//! Project-level rules: existence of a referenced project and the shape of
//! the writable project fields.

use crate::error::CoreError;
use crate::permissions::{first_unknown, ANON_PERMISSIONS, MEMBER_PERMISSIONS};
use crate::types::DbId;

use super::store::RuleStore;
use super::violation::RuleViolation;

/// Reject a `project_id` that does not resolve to a project.
pub async fn validate_project_exists<S: RuleStore + ?Sized>(
    store: &S,
    project_id: DbId,
) -> Result<(), CoreError> {
    if !store.project_exists(project_id).await? {
        return Err(RuleViolation::ReferenceNotFound {
            field: "project_id",
            entity: "project",
        }
        .into());
    }
    Ok(())
}

/// Check the permission lists a client may write on a project.
///
/// Anonymous access is limited to read permissions; public access may use
/// any member permission. `None` means the field was not supplied.
pub fn validate_project_permissions(
    anon_permissions: Option<&[String]>,
    public_permissions: Option<&[String]>,
) -> Result<(), CoreError> {
    if let Some(perm) = anon_permissions.and_then(|p| first_unknown(p, ANON_PERMISSIONS)) {
        return Err(RuleViolation::UnknownPermission {
            field: "anon_permissions",
            permission: perm.to_string(),
        }
        .into());
    }
    if let Some(perm) = public_permissions.and_then(|p| first_unknown(p, MEMBER_PERMISSIONS)) {
        return Err(RuleViolation::UnknownPermission {
            field: "public_permissions",
            permission: perm.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Check a role's permission list against the member vocabulary.
pub fn validate_role_permissions(permissions: &[String]) -> Result<(), CoreError> {
    match first_unknown(permissions, MEMBER_PERMISSIONS) {
        Some(perm) => Err(RuleViolation::UnknownPermission {
            field: "permissions",
            permission: perm.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
