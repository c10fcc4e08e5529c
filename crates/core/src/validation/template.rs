//! Project-template documents.
//!
//! A template stores the default configuration a new project is seeded
//! with as JSON documents: an options object plus one list per kind of
//! project-scoped option and one list of roles.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::naming::slugify;

use super::violation::RuleViolation;

/// Key of the free-form options object.
pub const DEFAULT_OPTIONS: &str = "default_options";

/// Keys of the list documents, in storage order.
pub const LIST_DOCUMENTS: [&str; 9] = [
    "epic_statuses",
    "us_statuses",
    "points",
    "task_statuses",
    "issue_statuses",
    "issue_types",
    "priorities",
    "severities",
    "roles",
];

/// One element of a list document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    /// Only meaningful for `roles`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Validate a supplied template document, or fall back to its empty default.
///
/// `default_options` must be an object. Every other document must be an
/// array whose elements each parse as a [`TemplateEntry`] with a non-empty
/// `name`. Names are unique within a document, since each document seeds
/// one project-scoped table; roles compare by slug.
pub fn document_or_default(field: &'static str, value: Option<Value>) -> Result<Value, CoreError> {
    let is_options = field == DEFAULT_OPTIONS;
    let value = match value {
        None | Some(Value::Null) if is_options => return Ok(json!({})),
        None | Some(Value::Null) => return Ok(json!([])),
        Some(value) => value,
    };

    if is_options {
        return match value {
            Value::Object(_) => Ok(value),
            _ => Err(RuleViolation::InvalidDocument {
                field,
                expected: "object",
            }
            .into()),
        };
    }

    let malformed = || -> CoreError {
        RuleViolation::InvalidDocument {
            field,
            expected: "array of objects with a name",
        }
        .into()
    };
    let items = value.as_array().ok_or_else(malformed)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let entry = TemplateEntry::deserialize(item).map_err(|_| malformed())?;
        if entry.name.trim().is_empty() {
            return Err(malformed());
        }
        let unique_key = if field == "roles" {
            slugify(&entry.name)
        } else {
            entry.name
        };
        if !seen.insert(unique_key) {
            return Err(RuleViolation::InvalidDocument {
                field,
                expected: "array of objects with unique names",
            }
            .into());
        }
    }
    Ok(value)
}

/// Parse the entries of a list document.
///
/// Documents written through [`document_or_default`] always parse in full;
/// elements that do not are skipped.
pub fn template_entries(document: &Value) -> Vec<TemplateEntry> {
    document
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| TemplateEntry::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}
