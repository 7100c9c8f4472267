//! Route definitions for camps and their nested donations.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{camp, donation};
use crate::state::AppState;

/// Routes mounted at `/camps`.
///
/// ```text
/// GET    /                                          list (filters + pagination)
/// POST   /                                          create
/// GET    /drop-off-locations                        all drop-off points
/// GET    /{id}                                      get_by_id
/// PUT    /{id}                                      update
/// GET    /{id}/inventory                            inventory rows
/// GET    /{id}/donations                            list donations
/// POST   /{id}/donations                            create donation (?autoApprove)
/// PATCH  /{id}/donations/{donation_id}/schedule           mark scheduled
/// PATCH  /{id}/donations/{donation_id}/complete-donator   donator completion
/// PATCH  /{id}/donations/{donation_id}/complete-owner     owner confirmation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(camp::list).post(camp::create))
        .route("/drop-off-locations", get(camp::drop_off_locations))
        .route("/{id}", get(camp::get_by_id).put(camp::update))
        .route("/{id}/inventory", get(camp::inventory))
        .route(
            "/{id}/donations",
            get(donation::list_by_camp).post(donation::create_for_camp),
        )
        .route(
            "/{id}/donations/{donation_id}/schedule",
            patch(donation::schedule_for_camp),
        )
        .route(
            "/{id}/donations/{donation_id}/complete-donator",
            patch(donation::complete_donator_for_camp),
        )
        .route(
            "/{id}/donations/{donation_id}/complete-owner",
            patch(donation::complete_owner_for_camp),
        )
}
