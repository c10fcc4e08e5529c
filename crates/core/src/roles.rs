//! Site-wide role names carried in access tokens.
//!
//! These are distinct from project roles: a site `admin` may use the
//! `/admin` endpoints regardless of project membership.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
