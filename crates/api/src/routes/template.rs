use axum::routing::get;
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/project-templates`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (site admin)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (site admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(template::list).post(template::create))
        .route("/{id}", get(template::get_by_id).put(template::update))
}
