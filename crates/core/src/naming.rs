//! Slug, tag and email normalisation for project records.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of characters that are not lowercase ASCII letters or digits.
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Derive a URL slug from a human-readable name.
///
/// Lowercases the name, collapses every run of non-alphanumeric characters
/// into a single `-` and trims leading/trailing separators. A name with no
/// usable characters yields `"project"`.
///
/// ```
/// use taskboard_core::naming::slugify;
///
/// assert_eq!(slugify("My  Big Project!"), "my-big-project");
/// assert_eq!(slugify("***"), "project");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let slug = NON_SLUG_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug.to_string()
    }
}

/// Normalise a tag list: trim, lowercase, drop empties and duplicates.
///
/// First occurrence wins, so the caller's ordering is preserved.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Emails are compared and stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
