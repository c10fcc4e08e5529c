use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /{key}   -> list_by_key
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(history::list_by_key))
}
