//! The integrity-rule failure taxonomy.

/// Field name used for record-level failures that are not tied to one input.
pub const NON_FIELD: &str = "non_field_errors";

/// A write rejected by an integrity rule.
///
/// Every variant maps to the request field it concerns (see
/// [`RuleViolation::field`]) so the HTTP layer can point the client at it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("Name duplicated for the project")]
    DuplicateName,

    #[error("There's no {entity} with that id")]
    ReferenceNotFound {
        field: &'static str,
        entity: &'static str,
    },

    #[error("The user already exists in the project")]
    DuplicateMembership { field: &'static str },

    #[error("The user must be a valid contact")]
    InvalidContact,

    #[error("Invalid role for the project")]
    InvalidRole,

    #[error("The project owner must be admin.")]
    OwnerMustBeAdmin,

    #[error("At least one user must be an active admin for this project.")]
    NoActiveAdmin,

    #[error("Email or user must be set")]
    MissingIdentifier,

    #[error("Role must be set")]
    MissingRole,

    #[error("Invalid role ids. All roles must belong to the same project.")]
    InvalidRoleSet,

    #[error("Unknown permission '{permission}'")]
    UnknownPermission {
        field: &'static str,
        permission: String,
    },

    #[error("Field '{field}' must be a JSON {expected}")]
    InvalidDocument {
        field: &'static str,
        expected: &'static str,
    },
}

impl RuleViolation {
    /// The request field this violation is reported against.
    pub fn field(&self) -> &'static str {
        match self {
            Self::DuplicateName => "name",
            Self::ReferenceNotFound { field, .. } => *field,
            Self::DuplicateMembership { field } => *field,
            Self::InvalidContact => "user",
            Self::InvalidRole | Self::MissingRole => "role",
            Self::OwnerMustBeAdmin | Self::NoActiveAdmin => "is_admin",
            Self::MissingIdentifier => NON_FIELD,
            Self::InvalidRoleSet => "bulk_memberships",
            Self::UnknownPermission { field, .. } => *field,
            Self::InvalidDocument { field, .. } => *field,
        }
    }
}
