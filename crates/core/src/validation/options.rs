//! Project-scoped options and the unique-name-per-project rule.
//!
//! Statuses, issue types, severities, priorities and points are all small
//! lookup records owned by one project. They share one rule: no two records
//! of the same kind may carry the same name within a project.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

use super::store::RuleStore;
use super::violation::RuleViolation;
use super::WriteOp;

/// Every kind of project-scoped option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(rename = "epic-statuses")]
    EpicStatus,
    #[serde(rename = "user-story-statuses")]
    UserStoryStatus,
    #[serde(rename = "task-statuses")]
    TaskStatus,
    #[serde(rename = "issue-statuses")]
    IssueStatus,
    #[serde(rename = "issue-types")]
    IssueType,
    #[serde(rename = "severities")]
    Severity,
    #[serde(rename = "priorities")]
    Priority,
    #[serde(rename = "points")]
    Points,
}

impl OptionKind {
    pub const ALL: [OptionKind; 8] = [
        OptionKind::EpicStatus,
        OptionKind::UserStoryStatus,
        OptionKind::TaskStatus,
        OptionKind::IssueStatus,
        OptionKind::IssueType,
        OptionKind::Severity,
        OptionKind::Priority,
        OptionKind::Points,
    ];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            OptionKind::EpicStatus => "epic_statuses",
            OptionKind::UserStoryStatus => "user_story_statuses",
            OptionKind::TaskStatus => "task_statuses",
            OptionKind::IssueStatus => "issue_statuses",
            OptionKind::IssueType => "issue_types",
            OptionKind::Severity => "severities",
            OptionKind::Priority => "priorities",
            OptionKind::Points => "points",
        }
    }

    /// Human-readable entity name, used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            OptionKind::EpicStatus => "EpicStatus",
            OptionKind::UserStoryStatus => "UserStoryStatus",
            OptionKind::TaskStatus => "TaskStatus",
            OptionKind::IssueStatus => "IssueStatus",
            OptionKind::IssueType => "IssueType",
            OptionKind::Severity => "Severity",
            OptionKind::Priority => "Priority",
            OptionKind::Points => "Points",
        }
    }

    /// Key of the project-template document that seeds this kind.
    pub fn template_field(self) -> &'static str {
        match self {
            OptionKind::EpicStatus => "epic_statuses",
            OptionKind::UserStoryStatus => "us_statuses",
            OptionKind::TaskStatus => "task_statuses",
            OptionKind::IssueStatus => "issue_statuses",
            OptionKind::IssueType => "issue_types",
            OptionKind::Severity => "severities",
            OptionKind::Priority => "priorities",
            OptionKind::Points => "points",
        }
    }
}

/// Identity of an existing option being updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedRecordRef {
    pub id: DbId,
    pub project_id: DbId,
}

/// Reject a name already used by another option of `kind` in the project.
///
/// On update the scope is the existing record's project and the record
/// itself is excluded, so re-saving an unchanged name passes. On create the
/// scope is `project_id`. A missing name (or, on create, a missing project)
/// skips the check.
pub async fn validate_unique_option_name<S: RuleStore + ?Sized>(
    store: &S,
    kind: OptionKind,
    op: WriteOp<ScopedRecordRef>,
    project_id: Option<DbId>,
    name: Option<&str>,
) -> Result<(), CoreError> {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Ok(());
    };

    let (scope, exclude_id) = match op {
        WriteOp::Update(existing) => (existing.project_id, Some(existing.id)),
        WriteOp::Create => match project_id {
            Some(project_id) => (project_id, None),
            None => return Ok(()),
        },
    };

    if store
        .option_name_taken(kind, scope, name, exclude_id)
        .await?
    {
        return Err(RuleViolation::DuplicateName.into());
    }
    Ok(())
}
