//! Permission identifier vocabulary.
//!
//! Projects store ordered lists of these identifiers for anonymous and
//! public (any logged-in user) access. Roles carry the same identifiers.

/// Permissions grantable to anonymous visitors. Read-only by construction.
pub const ANON_PERMISSIONS: &[&str] = &[
    "view_project",
    "view_milestones",
    "view_epics",
    "view_us",
    "view_tasks",
    "view_issues",
    "view_wiki_pages",
    "view_wiki_links",
];

/// Permissions grantable to any member, and to the public.
pub const MEMBER_PERMISSIONS: &[&str] = &[
    "view_project",
    "view_milestones",
    "add_milestone",
    "modify_milestone",
    "delete_milestone",
    "view_epics",
    "add_epic",
    "modify_epic",
    "comment_epic",
    "delete_epic",
    "view_us",
    "add_us",
    "modify_us",
    "comment_us",
    "delete_us",
    "view_tasks",
    "add_task",
    "modify_task",
    "comment_task",
    "delete_task",
    "view_issues",
    "add_issue",
    "modify_issue",
    "comment_issue",
    "delete_issue",
    "view_wiki_pages",
    "add_wiki_page",
    "modify_wiki_page",
    "comment_wiki_page",
    "delete_wiki_page",
    "view_wiki_links",
    "add_wiki_link",
    "modify_wiki_link",
    "delete_wiki_link",
];

/// Return the first identifier in `requested` that is not in `allowed`.
pub fn first_unknown<'a>(requested: &'a [String], allowed: &[&str]) -> Option<&'a str> {
    requested
        .iter()
        .map(String::as_str)
        .find(|perm| !allowed.contains(perm))
}
