//! In-memory [`RuleStore`] used by the rule unit tests.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::naming::normalize_email;
use crate::types::DbId;

use super::options::OptionKind;
use super::store::{ProjectRef, RuleStore, UserRef};

#[derive(Debug, Clone)]
pub struct MemMembership {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub email: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub projects: Vec<ProjectRef>,
    pub users: Vec<UserRef>,
    /// `(role_id, project_id)`
    pub roles: Vec<(DbId, DbId)>,
    pub memberships: Vec<MemMembership>,
    /// `(kind, id, project_id, name)`
    pub options: Vec<(OptionKind, DbId, DbId, String)>,
    /// `(actor_id, visible_user_id)`
    pub contacts: Vec<(DbId, DbId)>,
}

impl MemoryStore {
    pub fn add_project(&mut self, id: DbId, owner_id: DbId) {
        self.projects.push(ProjectRef { id, owner_id });
    }

    pub fn add_user(&mut self, id: DbId, email: &str) {
        self.users.push(UserRef {
            id,
            email: email.to_string(),
            is_active: true,
        });
    }

    pub fn deactivate_user(&mut self, id: DbId) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
    }

    pub fn add_role(&mut self, id: DbId, project_id: DbId) {
        self.roles.push((id, project_id));
    }

    pub fn add_member(&mut self, id: DbId, project_id: DbId, user_id: DbId, is_admin: bool) {
        self.memberships.push(MemMembership {
            id,
            project_id,
            user_id: Some(user_id),
            email: None,
            is_admin,
        });
    }

    pub fn add_invite(&mut self, id: DbId, project_id: DbId, email: &str) {
        self.memberships.push(MemMembership {
            id,
            project_id,
            user_id: None,
            email: Some(email.to_string()),
            is_admin: false,
        });
    }

    pub fn add_option(&mut self, kind: OptionKind, id: DbId, project_id: DbId, name: &str) {
        self.options.push((kind, id, project_id, name.to_string()));
    }

    pub fn add_contact(&mut self, actor_id: DbId, user_id: DbId) {
        self.contacts.push((actor_id, user_id));
    }

    fn user(&self, id: DbId) -> Option<&UserRef> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[async_trait]
impl RuleStore for MemoryStore {
    async fn project_exists(&self, project_id: DbId) -> Result<bool, CoreError> {
        Ok(self.projects.iter().any(|p| p.id == project_id))
    }

    async fn find_project(&self, project_id: DbId) -> Result<Option<ProjectRef>, CoreError> {
        Ok(self.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn find_user(&self, user_id: DbId) -> Result<Option<UserRef>, CoreError> {
        Ok(self.user(user_id).cloned())
    }

    async fn option_name_taken(
        &self,
        kind: OptionKind,
        project_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, CoreError> {
        Ok(self.options.iter().any(|(k, id, pid, n)| {
            *k == kind && *pid == project_id && n == name && Some(*id) != exclude_id
        }))
    }

    async fn membership_email_taken(
        &self,
        project_id: DbId,
        email: &str,
        exclude_membership_id: Option<DbId>,
    ) -> Result<bool, CoreError> {
        let email = normalize_email(email);
        Ok(self.memberships.iter().any(|m| {
            if m.project_id != project_id || Some(m.id) == exclude_membership_id {
                return false;
            }
            let invite_match = m.email.as_deref().map(normalize_email) == Some(email.clone());
            let user_match = m
                .user_id
                .and_then(|uid| self.user(uid))
                .is_some_and(|u| normalize_email(&u.email) == email);
            invite_match || user_match
        }))
    }

    async fn is_visible_contact(&self, actor_id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        Ok(self.contacts.contains(&(actor_id, user_id)))
    }

    async fn role_in_project(&self, role_id: DbId, project_id: DbId) -> Result<bool, CoreError> {
        Ok(self.roles.contains(&(role_id, project_id)))
    }

    async fn project_role_ids(
        &self,
        project_id: DbId,
        role_ids: &[DbId],
    ) -> Result<Vec<DbId>, CoreError> {
        Ok(self
            .roles
            .iter()
            .filter(|(id, pid)| *pid == project_id && role_ids.contains(id))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn has_other_active_admin(
        &self,
        project_id: DbId,
        exclude_user_id: DbId,
    ) -> Result<bool, CoreError> {
        Ok(self.memberships.iter().any(|m| {
            m.project_id == project_id
                && m.is_admin
                && m.user_id.is_some_and(|uid| {
                    uid != exclude_user_id && self.user(uid).is_some_and(|u| u.is_active)
                })
        }))
    }
}
