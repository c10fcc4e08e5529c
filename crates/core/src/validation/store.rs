//! Read-only persistence seam used by the integrity rules.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

use super::options::OptionKind;

/// The slice of a project the rules care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: DbId,
    pub owner_id: DbId,
}

/// The slice of a user the rules care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: DbId,
    pub email: String,
    pub is_active: bool,
}

/// Queries the integrity rules issue against persisted state.
///
/// Implementations must not write. Lookup failures are reported as
/// [`CoreError::Internal`]; "not found" is a normal `Ok` answer.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Whether a project with this id exists.
    async fn project_exists(&self, project_id: DbId) -> Result<bool, CoreError>;

    async fn find_project(&self, project_id: DbId) -> Result<Option<ProjectRef>, CoreError>;

    async fn find_user(&self, user_id: DbId) -> Result<Option<UserRef>, CoreError>;

    /// Whether another option of `kind` in `project_id` already uses `name`.
    async fn option_name_taken(
        &self,
        kind: OptionKind,
        project_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, CoreError>;

    /// Whether a membership of `project_id` matches `email`, either through
    /// its own pending-invite email or through its user's email.
    async fn membership_email_taken(
        &self,
        project_id: DbId,
        email: &str,
        exclude_membership_id: Option<DbId>,
    ) -> Result<bool, CoreError>;

    /// Whether `user_id` is in the set of contacts visible to `actor_id`.
    async fn is_visible_contact(&self, actor_id: DbId, user_id: DbId) -> Result<bool, CoreError>;

    async fn role_in_project(&self, role_id: DbId, project_id: DbId) -> Result<bool, CoreError>;

    /// The subset of `role_ids` that are roles of `project_id`.
    async fn project_role_ids(
        &self,
        project_id: DbId,
        role_ids: &[DbId],
    ) -> Result<Vec<DbId>, CoreError>;

    /// Whether the project has an active admin member other than `exclude_user_id`.
    async fn has_other_active_admin(
        &self,
        project_id: DbId,
        exclude_user_id: DbId,
    ) -> Result<bool, CoreError>;
}
