//! Handlers for donations nested under help requests and camps.
//!
//! The donation endpoints enforce the two server-side policies the data
//! model alone cannot: the contact-visibility privacy boundary, and the
//! authorization rules around the three progress marks.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reliefnet_core::donation::{can_view_donator_contact, ProgressMark};
use reliefnet_core::error::CoreError;
use reliefnet_core::inventory::sanitize_quantities;
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::DbId;
use reliefnet_db::models::camp::Camp;
use reliefnet_db::models::club::VolunteerClub;
use reliefnet_db::models::donation::{CreateDonation, Donation, DonationView};
use reliefnet_db::models::help_request::HelpRequest;
use reliefnet_db::models::inventory::InventoryTarget;
use reliefnet_db::repositories::{CampRepo, ClubRepo, DonationRepo, HelpRequestRepo};

use crate::error::{AppError, AppResult, FieldViolation};
use crate::middleware::auth::AuthUser;
use crate::response::ListResponse;
use crate::state::AppState;

/// The resolved target of a donation, with enough context to answer
/// ownership questions.
enum TargetRef {
    HelpRequest(HelpRequest),
    Camp { camp: Camp, club: VolunteerClub },
}

impl TargetRef {
    fn inventory_target(&self) -> InventoryTarget {
        match self {
            TargetRef::HelpRequest(request) => InventoryTarget::HelpRequest(request.id),
            TargetRef::Camp { camp, .. } => InventoryTarget::Camp(camp.id),
        }
    }

    /// The user who owns this target: the victim for a help request, the
    /// club's linked user for a camp.
    fn owner_user_id(&self) -> Option<DbId> {
        match self {
            TargetRef::HelpRequest(request) => Some(request.user_id),
            TargetRef::Camp { club, .. } => club.user_id,
        }
    }

    /// The club to enroll the donator into on confirmation, camps only.
    fn membership_club_id(&self) -> Option<DbId> {
        match self {
            TargetRef::HelpRequest(_) => None,
            TargetRef::Camp { club, .. } => Some(club.id),
        }
    }

    fn is_owner(&self, auth: &AuthUser) -> bool {
        auth.is_admin() || self.owner_user_id() == Some(auth.user_id)
    }
}

async fn resolve_help_request(state: &AppState, id: DbId) -> AppResult<TargetRef> {
    let request = HelpRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HelpRequest",
            id,
        }))?;
    Ok(TargetRef::HelpRequest(request))
}

async fn resolve_camp(state: &AppState, id: DbId) -> AppResult<TargetRef> {
    let camp = CampRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Camp", id }))?;
    let club = ClubRepo::find_by_id(&state.pool, camp.club_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VolunteerClub",
            id: camp.club_id,
        }))?;
    Ok(TargetRef::Camp { camp, club })
}

/// Whether `auth` may see the donator contact fields of `donation`.
fn contact_visible(auth: &AuthUser, donation: &Donation, target: &TargetRef) -> bool {
    if auth.is_admin() {
        return true;
    }
    match target.owner_user_id() {
        Some(owner) => can_view_donator_contact(auth.user_id, donation.donator_id, owner),
        None => auth.user_id == donation.donator_id,
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// POST /api/help-requests/{id}/donations
pub async fn create_for_help_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDonation>,
) -> AppResult<(StatusCode, Json<DonationView>)> {
    if input.auto_approve {
        return Err(AppError::BadRequest(
            "autoApprove is only available for camp donations".into(),
        ));
    }
    let target = resolve_help_request(&state, id).await?;
    create_donation(auth, state, target, input, false).await
}

/// POST /api/camps/{id}/donations
///
/// `autoApprove` skips the pending state entirely; it is restricted to the
/// owning club's user or an admin.
pub async fn create_for_camp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDonation>,
) -> AppResult<(StatusCode, Json<DonationView>)> {
    let target = resolve_camp(&state, id).await?;

    let auto_approve = input.auto_approve;
    if auto_approve && !target.is_owner(&auth) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the camp's club or an admin may auto-approve donations".into(),
        )));
    }

    create_donation(auth, state, target, input, auto_approve).await
}

async fn create_donation(
    auth: AuthUser,
    state: AppState,
    target: TargetRef,
    input: CreateDonation,
    auto_approve: bool,
) -> AppResult<(StatusCode, Json<DonationView>)> {
    let ration_items = sanitize_quantities(&input.ration_items);
    validate_donation(&input, &ration_items)?;

    let donation = DonationRepo::create(
        &state.pool,
        target.inventory_target(),
        auth.user_id,
        input.donator_name.trim(),
        input.donator_mobile_number.trim(),
        &ration_items,
        auto_approve,
    )
    .await?;

    // An auto-approved donation is already confirmed, which enrolls the
    // donator as a club member.
    if auto_approve {
        if let Some(club_id) = target.membership_club_id() {
            ClubRepo::add_member(&state.pool, club_id, donation.donator_id).await?;
        }
    }

    let view = donation.into_view(ration_items, true);
    Ok((StatusCode::CREATED, Json(view)))
}

fn validate_donation(
    input: &CreateDonation,
    sanitized: &BTreeMap<RationItemType, i64>,
) -> AppResult<()> {
    let mut violations = Vec::new();

    if input.donator_name.trim().is_empty() {
        violations.push(FieldViolation::new(
            "donatorName",
            "is_not_empty",
            "donatorName must not be empty",
        ));
    }
    if input.donator_mobile_number.trim().is_empty() {
        violations.push(FieldViolation::new(
            "donatorMobileNumber",
            "is_not_empty",
            "donatorMobileNumber must not be empty",
        ));
    }
    if sanitized.is_empty() {
        violations.push(FieldViolation::new(
            "rationItems",
            "is_not_empty",
            "rationItems must contain at least one positive quantity",
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/help-requests/{id}/donations
///
/// The server decides contact visibility per row; a third party never
/// receives the donator's name or mobile number.
pub async fn list_by_help_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ListResponse<DonationView>>> {
    let target = resolve_help_request(&state, id).await?;
    let donations = DonationRepo::list_by_help_request(&state.pool, id).await?;
    list_views(&state, &auth, &target, donations).await
}

/// GET /api/camps/{id}/donations
pub async fn list_by_camp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ListResponse<DonationView>>> {
    let target = resolve_camp(&state, id).await?;
    let donations = DonationRepo::list_by_camp(&state.pool, id).await?;
    list_views(&state, &auth, &target, donations).await
}

/// GET /api/help-requests/my/donations
///
/// Always includes contact info -- it is the caller's own data.
pub async fn my_donations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<DonationView>>> {
    let donations = DonationRepo::list_by_donator(&state.pool, auth.user_id).await?;
    let count = donations.len() as i64;

    let ids: Vec<DbId> = donations.iter().map(|d| d.id).collect();
    let mut items = DonationRepo::items_for_many(&state.pool, &ids).await?;

    let data = donations
        .into_iter()
        .map(|donation| {
            let ration_items = items.remove(&donation.id).unwrap_or_default();
            donation.into_view(ration_items, true)
        })
        .collect();

    Ok(Json(ListResponse { data, count }))
}

async fn list_views(
    state: &AppState,
    auth: &AuthUser,
    target: &TargetRef,
    donations: Vec<Donation>,
) -> AppResult<Json<ListResponse<DonationView>>> {
    let count = donations.len() as i64;
    let ids: Vec<DbId> = donations.iter().map(|d| d.id).collect();
    let mut items = DonationRepo::items_for_many(&state.pool, &ids).await?;

    let data = donations
        .into_iter()
        .map(|donation| {
            let show = contact_visible(auth, &donation, target);
            let ration_items = items.remove(&donation.id).unwrap_or_default();
            donation.into_view(ration_items, show)
        })
        .collect();

    Ok(Json(ListResponse { data, count }))
}

// ---------------------------------------------------------------------------
// Progress marks
// ---------------------------------------------------------------------------

/// PATCH /api/help-requests/{id}/donations/{donation_id}/schedule
pub async fn schedule_for_help_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, donation_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DonationView>> {
    let target = resolve_help_request(&state, id).await?;
    apply_mark(state, auth, target, donation_id, ProgressMark::Scheduled).await
}

/// PATCH /api/help-requests/{id}/donations/{donation_id}/complete-donator
pub async fn complete_donator_for_help_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, donation_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DonationView>> {
    let target = resolve_help_request(&state, id).await?;
    apply_mark(
        state,
        auth,
        target,
        donation_id,
        ProgressMark::CompletedByDonator,
    )
    .await
}

/// PATCH /api/help-requests/{id}/donations/{donation_id}/complete-owner
pub async fn complete_owner_for_help_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, donation_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DonationView>> {
    let target = resolve_help_request(&state, id).await?;
    apply_mark(
        state,
        auth,
        target,
        donation_id,
        ProgressMark::CompletedByOwner,
    )
    .await
}

/// PATCH /api/camps/{id}/donations/{donation_id}/schedule
pub async fn schedule_for_camp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, donation_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DonationView>> {
    let target = resolve_camp(&state, id).await?;
    apply_mark(state, auth, target, donation_id, ProgressMark::Scheduled).await
}

/// PATCH /api/camps/{id}/donations/{donation_id}/complete-donator
pub async fn complete_donator_for_camp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, donation_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DonationView>> {
    let target = resolve_camp(&state, id).await?;
    apply_mark(
        state,
        auth,
        target,
        donation_id,
        ProgressMark::CompletedByDonator,
    )
    .await
}

/// PATCH /api/camps/{id}/donations/{donation_id}/complete-owner
pub async fn complete_owner_for_camp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, donation_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DonationView>> {
    let target = resolve_camp(&state, id).await?;
    apply_mark(
        state,
        auth,
        target,
        donation_id,
        ProgressMark::CompletedByOwner,
    )
    .await
}

/// Shared transition logic: resolve the donation, check it belongs to the
/// path target, authorize the caller, and apply the (idempotent) mark.
async fn apply_mark(
    state: AppState,
    auth: AuthUser,
    target: TargetRef,
    donation_id: DbId,
    mark: ProgressMark,
) -> AppResult<Json<DonationView>> {
    let donation = DonationRepo::find_by_id(&state.pool, donation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id: donation_id,
        }))?;

    let belongs = match &target {
        TargetRef::HelpRequest(request) => donation.help_request_id == Some(request.id),
        TargetRef::Camp { camp, .. } => donation.camp_id == Some(camp.id),
    };
    if !belongs {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id: donation_id,
        }));
    }

    let is_donator = donation.donator_id == auth.user_id;
    mark.authorize(is_donator, target.is_owner(&auth))?;

    let updated = match mark {
        ProgressMark::Scheduled => DonationRepo::mark_scheduled(&state.pool, donation_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Donation",
                id: donation_id,
            }))?,
        ProgressMark::CompletedByDonator => {
            DonationRepo::mark_completed_by_donator(&state.pool, donation_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Donation",
                    id: donation_id,
                }))?
        }
        ProgressMark::CompletedByOwner => {
            let confirmed =
                DonationRepo::confirm_by_owner(&state.pool, &donation, target.inventory_target())
                    .await?;
            // Confirmation enrolls the donator into the owning club.
            if let Some(club_id) = target.membership_club_id() {
                ClubRepo::add_member(&state.pool, club_id, confirmed.donator_id).await?;
            }
            confirmed
        }
    };

    let ration_items = DonationRepo::items_for(&state.pool, donation_id).await?;
    let show = contact_visible(&auth, &updated, &target);
    Ok(Json(updated.into_view(ration_items, show)))
}
