//! Handlers for the `/camps` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reliefnet_core::camp::{CampNeed, CampType};
use reliefnet_core::error::CoreError;
use reliefnet_core::geo::BoundingBox;
use reliefnet_core::pagination::{clamp_limit, clamp_page, offset_for};
use reliefnet_core::types::DbId;
use reliefnet_db::models::camp::{
    Camp, CampDetailView, CampFilter, CreateCamp, DropOffLocation, UpdateCamp,
};
use reliefnet_db::models::inventory::{InventoryItemView, InventoryTarget};
use reliefnet_db::repositories::{CampRepo, ClubRepo, InventoryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult, FieldViolation};
use crate::middleware::auth::AuthUser;
use crate::response::ListResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /camps`. `needs` is a comma-separated list of
/// camp-need codes; a camp matches when it has ANY of them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampListParams {
    pub camp_type: Option<CampType>,
    pub needs: Option<String>,
    pub district: Option<String>,
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
    pub min_lng: Option<f64>,
    pub max_lng: Option<f64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/camps
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CampListParams>,
) -> AppResult<Json<ListResponse<Camp>>> {
    let needs = parse_needs(params.needs.as_deref())?;
    let limit = clamp_limit(params.limit);
    let offset = offset_for(clamp_page(params.page), limit);

    let filter = CampFilter {
        camp_type: params.camp_type,
        needs,
        district: params.district,
        bounds: BoundingBox::from_parts(
            params.min_lat,
            params.max_lat,
            params.min_lng,
            params.max_lng,
        ),
        limit,
        offset,
    };

    let data = CampRepo::list(&state.pool, &filter).await?;
    let count = CampRepo::count(&state.pool, &filter).await?;
    Ok(Json(ListResponse { data, count }))
}

/// POST /api/camps
///
/// The caller must be the club's linked user (or an admin). The `items`
/// list is the source of truth for the camp's initial inventory.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCamp>,
) -> AppResult<(StatusCode, Json<CampDetailView>)> {
    validate_create(&input)?;

    let club = ClubRepo::find_by_id(&state.pool, input.club_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VolunteerClub",
            id: input.club_id,
        }))?;

    if club.user_id != Some(auth.user_id) && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the club's linked user may create camps for it".into(),
        )));
    }

    let camp = CampRepo::create(&state.pool, &input).await?;
    let view = detail_view(&state, camp, Some(true)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/camps/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CampDetailView>> {
    let camp = CampRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Camp", id }))?;

    let is_owner = camp_owner(&state, &camp, &auth).await?;
    let view = detail_view(&state, camp, Some(is_owner)).await?;
    Ok(Json(view))
}

/// PUT /api/camps/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCamp>,
) -> AppResult<Json<CampDetailView>> {
    let existing = CampRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Camp", id }))?;

    if !camp_owner(&state, &existing, &auth).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the camp's club may edit it".into(),
        )));
    }

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::field(
                "name",
                "is_not_empty",
                "name must not be empty",
            ));
        }
    }
    if input.people_count.is_some_and(|count| count < 0) {
        return Err(AppError::field(
            "peopleCount",
            "min",
            "peopleCount must not be negative",
        ));
    }

    let camp = CampRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Camp", id }))?;

    let view = detail_view(&state, camp, Some(true)).await?;
    Ok(Json(view))
}

/// GET /api/camps/{id}/inventory
pub async fn inventory(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<InventoryItemView>>> {
    CampRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Camp", id }))?;

    let rows = InventoryRepo::list_for(&state.pool, InventoryTarget::Camp(id)).await?;
    Ok(Json(rows.into_iter().map(InventoryItemView::from).collect()))
}

/// GET /api/camps/drop-off-locations
///
/// Every drop-off point across all camps, for the map view.
pub async fn drop_off_locations(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DropOffLocation>>> {
    let locations = CampRepo::all_drop_offs(&state.pool).await?;
    Ok(Json(locations))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn camp_owner(state: &AppState, camp: &Camp, auth: &AuthUser) -> AppResult<bool> {
    if auth.is_admin() {
        return Ok(true);
    }
    let club = ClubRepo::find_by_id(&state.pool, camp.club_id).await?;
    Ok(club.is_some_and(|club| club.user_id == Some(auth.user_id)))
}

async fn detail_view(
    state: &AppState,
    camp: Camp,
    is_owner: Option<bool>,
) -> AppResult<CampDetailView> {
    let drop_off_locations = CampRepo::drop_offs_for(&state.pool, camp.id).await?;
    let help_request_ids = CampRepo::linked_help_request_ids(&state.pool, camp.id).await?;
    let donation_ids = CampRepo::linked_donation_ids(&state.pool, camp.id).await?;

    Ok(CampDetailView {
        camp,
        drop_off_locations,
        help_request_ids,
        donation_ids,
        is_owner,
    })
}

fn parse_needs(raw: Option<&str>) -> AppResult<Option<Vec<CampNeed>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let mut needs = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let need = code
            .parse::<CampNeed>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        needs.push(need);
    }
    Ok(if needs.is_empty() { None } else { Some(needs) })
}

fn validate_create(input: &CreateCamp) -> AppResult<()> {
    let mut violations = Vec::new();

    if input.name.trim().is_empty() {
        violations.push(FieldViolation::new(
            "name",
            "is_not_empty",
            "name must not be empty",
        ));
    }
    if input.district.trim().is_empty() {
        violations.push(FieldViolation::new(
            "district",
            "is_not_empty",
            "district must not be empty",
        ));
    }
    if input.contact.trim().is_empty() {
        violations.push(FieldViolation::new(
            "contact",
            "is_not_empty",
            "contact must not be empty",
        ));
    }
    if input.people_count.is_some_and(|count| count < 0) {
        violations.push(FieldViolation::new(
            "peopleCount",
            "min",
            "peopleCount must not be negative",
        ));
    }
    for location in &input.drop_off_locations {
        if location.name.trim().is_empty() {
            violations.push(FieldViolation::new(
                "dropOffLocations",
                "is_not_empty",
                "drop-off location names must not be empty",
            ));
            break;
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}
