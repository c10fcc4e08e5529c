//! Route definitions for the `/projects` resource.
//!
//! Also nests memberships and options under `/projects/{project_id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{membership, project, project_option};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                      -> list
/// POST   /                                      -> create
/// POST   /bulk-update-order                     -> bulk_update_order
/// GET    /{project_id}                          -> get_by_id
/// PUT    /{project_id}                          -> update
///
/// GET    /{project_id}/memberships              -> list_by_project
/// POST   /{project_id}/memberships              -> create
///
/// GET    /{project_id}/options/{kind}           -> list_by_project
/// POST   /{project_id}/options/{kind}           -> create
/// PUT    /{project_id}/options/{kind}/{id}      -> update
/// DELETE /{project_id}/options/{kind}/{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    let option_routes = Router::new()
        .route(
            "/",
            get(project_option::list_by_project).post(project_option::create),
        )
        .route(
            "/{id}",
            put(project_option::update).delete(project_option::delete),
        );

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/bulk-update-order", post(project::bulk_update_order))
        .route(
            "/{project_id}",
            get(project::get_by_id).put(project::update),
        )
        .route(
            "/{project_id}/memberships",
            get(membership::list_by_project).post(membership::create),
        )
        .nest("/{project_id}/options/{kind}", option_routes)
}
