use axum::routing::put;
use axum::Router;

use crate::handlers::membership;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the site `admin` role.
///
/// ```text
/// PUT    /memberships/{id}     -> admin_update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/memberships/{id}", put(membership::admin_update))
}
