//! Route definitions for the `/clubs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::club;
use crate::state::AppState;

/// Routes mounted at `/clubs`.
///
/// ```text
/// GET  /              list
/// POST /              create (caller becomes linked user)
/// GET  /{id}          get_by_id
/// GET  /{id}/members  membership list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(club::list).post(club::create))
        .route("/{id}", get(club::get_by_id))
        .route("/{id}/members", get(club::members))
}
