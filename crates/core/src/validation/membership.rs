//! Membership rules.
//!
//! A membership links a user, or a pending invitee email, to a project
//! with a role and an admin flag. The rules keep three invariants:
//!
//! - nobody is a member of the same project twice (by email or by user),
//! - the role belongs to the membership's project,
//! - the project owner stays admin and the project keeps an active admin.

use crate::error::CoreError;
use crate::naming::normalize_email;
use crate::types::DbId;

use super::store::{ProjectRef, RuleStore};
use super::violation::RuleViolation;
use super::{Actor, WriteOp};

/// Prior state of a membership being updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipRef {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
}

/// The attributes of a membership write. `None` means "not supplied".
///
/// `project_id` is only consulted on create; an update stays in the
/// project of the existing record.
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipWrite<'a> {
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub email: Option<&'a str>,
    pub role_id: Option<DbId>,
    pub is_admin: Option<bool>,
}

/// Rule set for membership writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipValidator;

/// Rule set used by the membership update endpoints. Same rules as
/// [`MembershipValidator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipAdminValidator;

impl MembershipAdminValidator {
    pub async fn validate<S: RuleStore + ?Sized>(
        &self,
        store: &S,
        actor: Option<&Actor>,
        op: WriteOp<MembershipRef>,
        input: &MembershipWrite<'_>,
    ) -> Result<(), CoreError> {
        MembershipValidator.validate(store, actor, op, input).await
    }
}

impl MembershipValidator {
    /// Run every membership rule in order, stopping at the first failure.
    pub async fn validate<S: RuleStore + ?Sized>(
        &self,
        store: &S,
        actor: Option<&Actor>,
        op: WriteOp<MembershipRef>,
        input: &MembershipWrite<'_>,
    ) -> Result<(), CoreError> {
        let project = Self::target_project(store, &op, input).await?;

        Self::validate_email(store, &op, &project, input.email).await?;
        Self::validate_user(store, actor, &op, &project, input.user_id).await?;
        Self::validate_role(store, &project, input.role_id).await?;
        Self::validate_is_admin(store, &op, &project, input.is_admin).await?;
        Self::validate_record(&op, input)
    }

    async fn target_project<S: RuleStore + ?Sized>(
        store: &S,
        op: &WriteOp<MembershipRef>,
        input: &MembershipWrite<'_>,
    ) -> Result<ProjectRef, CoreError> {
        let project_id = op
            .existing()
            .map_or(input.project_id, |existing| existing.project_id);
        store
            .find_project(project_id)
            .await?
            .ok_or_else(|| {
                RuleViolation::ReferenceNotFound {
                    field: "project",
                    entity: "project",
                }
                .into()
            })
    }

    async fn ensure_not_member<S: RuleStore + ?Sized>(
        store: &S,
        op: &WriteOp<MembershipRef>,
        project: &ProjectRef,
        email: &str,
        field: &'static str,
    ) -> Result<(), CoreError> {
        let exclude = op.existing().map(|existing| existing.id);
        if store
            .membership_email_taken(project.id, &normalize_email(email), exclude)
            .await?
        {
            return Err(RuleViolation::DuplicateMembership { field }.into());
        }
        Ok(())
    }

    /// An invitee email must not already be a member of the project.
    pub async fn validate_email<S: RuleStore + ?Sized>(
        store: &S,
        op: &WriteOp<MembershipRef>,
        project: &ProjectRef,
        email: Option<&str>,
    ) -> Result<(), CoreError> {
        match email.filter(|e| !e.trim().is_empty()) {
            Some(email) => Self::ensure_not_member(store, op, project, email, "email").await,
            None => Ok(()),
        }
    }

    /// A user must exist, be visible to the acting user (when there is one)
    /// and not already be a member of the project.
    pub async fn validate_user<S: RuleStore + ?Sized>(
        store: &S,
        actor: Option<&Actor>,
        op: &WriteOp<MembershipRef>,
        project: &ProjectRef,
        user_id: Option<DbId>,
    ) -> Result<(), CoreError> {
        let Some(user_id) = user_id else {
            return Ok(());
        };

        let user = store.find_user(user_id).await?.ok_or(
            RuleViolation::ReferenceNotFound {
                field: "user",
                entity: "user",
            },
        )?;

        if let Some(actor) = actor {
            if !store.is_visible_contact(actor.user_id, user.id).await? {
                return Err(RuleViolation::InvalidContact.into());
            }
        }

        Self::ensure_not_member(store, op, project, &user.email, "user").await
    }

    /// A role must belong to the membership's project.
    pub async fn validate_role<S: RuleStore + ?Sized>(
        store: &S,
        project: &ProjectRef,
        role_id: Option<DbId>,
    ) -> Result<(), CoreError> {
        let Some(role_id) = role_id else {
            return Ok(());
        };
        if !store.role_in_project(role_id, project.id).await? {
            return Err(RuleViolation::InvalidRole.into());
        }
        Ok(())
    }

    /// Clearing the admin flag must leave the owner admin and the project
    /// with another active admin.
    ///
    /// Only applies to updates of memberships that belong to a user;
    /// pending invitations never count as admins.
    pub async fn validate_is_admin<S: RuleStore + ?Sized>(
        store: &S,
        op: &WriteOp<MembershipRef>,
        project: &ProjectRef,
        is_admin: Option<bool>,
    ) -> Result<(), CoreError> {
        let Some(user_id) = op.existing().and_then(|existing| existing.user_id) else {
            return Ok(());
        };
        if is_admin != Some(false) {
            return Ok(());
        }

        if user_id == project.owner_id {
            return Err(RuleViolation::OwnerMustBeAdmin.into());
        }
        if !store.has_other_active_admin(project.id, user_id).await? {
            return Err(RuleViolation::NoActiveAdmin.into());
        }
        Ok(())
    }

    /// Record-level checks: a new membership needs a user or an email, and a role.
    pub fn validate_record(
        op: &WriteOp<MembershipRef>,
        input: &MembershipWrite<'_>,
    ) -> Result<(), CoreError> {
        if !op.is_create() {
            return Ok(());
        }
        let has_email = input.email.is_some_and(|e| !e.trim().is_empty());
        if input.user_id.is_none() && !has_email {
            return Err(RuleViolation::MissingIdentifier.into());
        }
        if input.role_id.is_none() {
            return Err(RuleViolation::MissingRole.into());
        }
        Ok(())
    }
}
