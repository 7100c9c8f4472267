//! Route definitions for help requests and their nested donations.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{donation, help_request};
use crate::state::AppState;

/// Routes mounted at `/help-requests`.
///
/// ```text
/// GET    /                                          list (filters + pagination)
/// POST   /                                          create
/// GET    /summary                                   aggregates
/// GET    /my                                        caller's requests
/// GET    /my/donations                              caller's donations
/// GET    /{id}                                      get_by_id
/// PUT    /{id}                                      update
/// GET    /{id}/inventory                            inventory rows
/// GET    /{id}/donations                            list donations
/// POST   /{id}/donations                            create donation
/// PATCH  /{id}/donations/{donation_id}/schedule           mark scheduled
/// PATCH  /{id}/donations/{donation_id}/complete-donator   donator completion
/// PATCH  /{id}/donations/{donation_id}/complete-owner     owner confirmation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(help_request::list).post(help_request::create))
        .route("/summary", get(help_request::summary))
        .route("/my", get(help_request::my_requests))
        .route("/my/donations", get(donation::my_donations))
        .route(
            "/{id}",
            get(help_request::get_by_id).put(help_request::update),
        )
        .route("/{id}/inventory", get(help_request::inventory))
        .route(
            "/{id}/donations",
            get(donation::list_by_help_request).post(donation::create_for_help_request),
        )
        .route(
            "/{id}/donations/{donation_id}/schedule",
            patch(donation::schedule_for_help_request),
        )
        .route(
            "/{id}/donations/{donation_id}/complete-donator",
            patch(donation::complete_donator_for_help_request),
        )
        .route(
            "/{id}/donations/{donation_id}/complete-owner",
            patch(donation::complete_owner_for_help_request),
        )
}
