use axum::routing::{post, put};
use axum::Router;

use crate::handlers::membership;
use crate::state::AppState;

/// Routes mounted at `/memberships`.
///
/// ```text
/// POST   /bulk-create     -> bulk_create
/// PUT    /{id}            -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bulk-create", post(membership::bulk_create))
        .route("/{id}", put(membership::update))
}
