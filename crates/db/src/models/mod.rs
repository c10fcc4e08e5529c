//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod history;
pub mod membership;
pub mod project;
pub mod project_option;
pub mod role;
pub mod template;
pub mod user;
