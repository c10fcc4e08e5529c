//! Rules for batch requests that reference a project by id.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

use super::project::validate_project_exists;
use super::store::RuleStore;
use super::violation::RuleViolation;

/// One `{project_id, order}` pair of a bulk project reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProjectOrderItem {
    pub project_id: DbId,
    pub order: i64,
}

/// Validate a bulk invitation: the project exists and every requested role
/// is one of its roles.
pub async fn validate_members_bulk<S: RuleStore + ?Sized>(
    store: &S,
    project_id: DbId,
    role_ids: &[DbId],
) -> Result<(), CoreError> {
    validate_project_exists(store, project_id).await?;
    validate_bulk_roles(store, project_id, role_ids).await
}

/// Every distinct role id must resolve to a role of `project_id`.
///
/// Compares id sets rather than counts, so an unknown id cannot be masked
/// by a repeated valid one.
pub async fn validate_bulk_roles<S: RuleStore + ?Sized>(
    store: &S,
    project_id: DbId,
    role_ids: &[DbId],
) -> Result<(), CoreError> {
    let requested: BTreeSet<DbId> = role_ids.iter().copied().collect();
    if requested.is_empty() {
        return Ok(());
    }

    let ids: Vec<DbId> = requested.iter().copied().collect();
    let found: BTreeSet<DbId> = store
        .project_role_ids(project_id, &ids)
        .await?
        .into_iter()
        .collect();

    if !requested.is_subset(&found) {
        return Err(RuleViolation::InvalidRoleSet.into());
    }
    Ok(())
}

/// Validate one reorder pair. `order` carries no constraint.
pub async fn validate_project_order<S: RuleStore + ?Sized>(
    store: &S,
    item: &ProjectOrderItem,
) -> Result<(), CoreError> {
    validate_project_exists(store, item.project_id).await
}
