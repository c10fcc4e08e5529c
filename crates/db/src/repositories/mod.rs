//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod history_repo;
pub mod membership_repo;
pub mod project_option_repo;
pub mod project_repo;
pub mod role_repo;
pub mod template_repo;
pub mod user_repo;

pub use history_repo::HistoryRepo;
pub use membership_repo::MembershipRepo;
pub use project_option_repo::ProjectOptionRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
