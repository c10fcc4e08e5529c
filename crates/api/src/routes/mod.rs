pub mod admin;
pub mod health;
pub mod history;
pub mod membership;
pub mod project;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/bulk-update-order                      reorder the caller's projects (POST)
/// /projects/{id}                                   get, update
/// /projects/{project_id}/memberships               list, create
/// /projects/{project_id}/options/{kind}            list, create
/// /projects/{project_id}/options/{kind}/{id}       update, delete
///
/// /memberships/bulk-create                         bulk invite (POST)
/// /memberships/{id}                                update (project admin)
///
/// /admin/memberships/{id}                          update (site admin)
///
/// /project-templates                               list, create
/// /project-templates/{id}                          get, update
///
/// /history/{key}                                   list entries for a key
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/memberships", membership::router())
        .nest("/admin", admin::router())
        .nest("/project-templates", template::router())
        .nest("/history", history::router())
}
