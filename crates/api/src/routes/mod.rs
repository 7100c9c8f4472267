pub mod auth;
pub mod camp;
pub mod club;
pub mod health;
pub mod help_request;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register                                       register (public)
///
/// /auth/refresh                                         refresh (public)
/// /auth/logout                                          logout (requires auth)
///
/// /help-requests                                        list, create
/// /help-requests/summary                                landing-page aggregates
/// /help-requests/my                                     caller's requests
/// /help-requests/my/donations                           caller's donations
/// /help-requests/{id}                                   get, update
/// /help-requests/{id}/inventory                         inventory rows
/// /help-requests/{id}/donations                         list, create
/// /help-requests/{id}/donations/{donation_id}/schedule           mark scheduled (PATCH)
/// /help-requests/{id}/donations/{donation_id}/complete-donator   donator completion (PATCH)
/// /help-requests/{id}/donations/{donation_id}/complete-owner     owner confirmation (PATCH)
///
/// /camps                                                list, create
/// /camps/drop-off-locations                             all drop-off points
/// /camps/{id}                                           get, update
/// /camps/{id}/inventory                                 inventory rows
/// /camps/{id}/donations                                 list, create (?autoApprove)
/// /camps/{id}/donations/{donation_id}/schedule                   mark scheduled (PATCH)
/// /camps/{id}/donations/{donation_id}/complete-donator           donator completion (PATCH)
/// /camps/{id}/donations/{donation_id}/complete-owner             owner confirmation (PATCH)
///
/// /clubs                                                list, create
/// /clubs/{id}                                           get
/// /clubs/{id}/members                                   membership list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/auth", auth::router())
        .nest("/help-requests", help_request::router())
        .nest("/camps", camp::router())
        .nest("/clubs", club::router())
}
