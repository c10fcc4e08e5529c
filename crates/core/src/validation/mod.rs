//! Integrity rules checked before a write is persisted.
//!
//! Each rule reads the state it needs through [`RuleStore`] and returns
//! `Err(CoreError::Rule(..))` on the first violation. Nothing in here
//! writes; callers persist only after the relevant rule set passed.

pub mod bulk;
pub mod membership;
pub mod options;
pub mod project;
pub mod store;
pub mod template;
pub mod violation;

#[cfg(test)]
pub(crate) mod memory;

pub use options::OptionKind;
pub use store::{ProjectRef, RuleStore, UserRef};
pub use violation::RuleViolation;

use crate::types::DbId;

/// Whether a write creates a record or modifies an existing one.
///
/// `Update` carries the prior state of the record being modified so rules
/// can scope to its project and exclude it from uniqueness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp<T> {
    Create,
    Update(T),
}

impl<T> WriteOp<T> {
    /// The prior state, if this is an update.
    pub fn existing(&self) -> Option<&T> {
        match self {
            WriteOp::Create => None,
            WriteOp::Update(prior) => Some(prior),
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, WriteOp::Create)
    }
}

/// The authenticated user on whose behalf a write is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
}
