//! Domain logic for the taskboard backend.
//!
//! Everything here is free of database and HTTP dependencies. Rules that
//! need persisted state read it through [`validation::RuleStore`].

pub mod error;
pub mod naming;
pub mod permissions;
pub mod roles;
pub mod types;
pub mod validation;
