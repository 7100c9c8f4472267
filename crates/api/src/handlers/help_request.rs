//! Handlers for the `/help-requests` resource.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reliefnet_core::error::CoreError;
use reliefnet_core::geo::BoundingBox;
use reliefnet_core::help_request::{validate_note, Urgency};
use reliefnet_core::pagination::{clamp_limit, clamp_page, offset_for};
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::DbId;
use reliefnet_db::models::help_request::{
    CreateHelpRequest, HelpRequestFilter, HelpRequestView, UpdateHelpRequest,
};
use reliefnet_db::models::inventory::{InventoryItemView, InventoryTarget};
use reliefnet_db::models::summary::HelpRequestSummary;
use reliefnet_db::repositories::{HelpRequestRepo, InventoryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult, FieldViolation};
use crate::middleware::auth::AuthUser;
use crate::response::ListResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /help-requests`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestListParams {
    pub urgency: Option<Urgency>,
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

/// GET /api/help-requests
///
/// List help requests with optional urgency, district, and map-bounds
/// filters. `count` is the total matching rows, not the page size.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HelpRequestListParams>,
) -> AppResult<Json<ListResponse<HelpRequestView>>> {
    let limit = clamp_limit(params.limit);
    let offset = offset_for(clamp_page(params.page), limit);

    let filter = HelpRequestFilter {
        urgency: params.urgency,
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

    let requests = HelpRequestRepo::list(&state.pool, &filter).await?;
    let count = HelpRequestRepo::count(&state.pool, &filter).await?;

    let mut codes = requested_codes(&state, &requests.iter().map(|r| r.id).collect::<Vec<_>>())
        .await?;
    let data = requests
        .into_iter()
        .map(|request| {
            let items = codes.remove(&request.id).unwrap_or_default();
            request.into_view(items, None)
        })
        .collect();

    Ok(Json(ListResponse { data, count }))
}

/// POST /api/help-requests
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateHelpRequest>,
) -> AppResult<(StatusCode, Json<HelpRequestView>)> {
    validate_create(&input)?;

    let request = HelpRequestRepo::create(&state.pool, auth.user_id, &input).await?;
    let codes = requested_codes(&state, &[request.id])
        .await?
        .remove(&request.id)
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(request.into_view(codes, Some(true))),
    ))
}

/// GET /api/help-requests/{id}
///
/// Includes a per-caller `isOwner` flag.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<HelpRequestView>> {
    let request = HelpRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HelpRequest",
            id,
        }))?;

    let is_owner = request.user_id == auth.user_id || auth.is_admin();
    let codes = requested_codes(&state, &[request.id])
        .await?
        .remove(&request.id)
        .unwrap_or_default();

    Ok(Json(request.into_view(codes, Some(is_owner))))
}

/// PUT /api/help-requests/{id}
///
/// Owner (or admin) edits; a present `rationItems` map re-declares needed
/// quantities.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHelpRequest>,
) -> AppResult<Json<HelpRequestView>> {
    let existing = HelpRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HelpRequest",
            id,
        }))?;

    if existing.user_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner may edit this help request".into(),
        )));
    }

    if let Some(note) = &input.note {
        if let Err(message) = validate_note(note) {
            return Err(AppError::field("note", "max_length", message));
        }
    }
    validate_demographics(
        input.total_people,
        input.elders,
        input.children,
        input.pets,
    )?;

    let request = HelpRequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HelpRequest",
            id,
        }))?;

    let codes = requested_codes(&state, &[request.id])
        .await?
        .remove(&request.id)
        .unwrap_or_default();

    Ok(Json(request.into_view(codes, Some(true))))
}

/// GET /api/help-requests/summary
///
/// Landing-page aggregates: counts by urgency/status/district, people
/// totals, and per-ration-item needed/donated/pending/remaining.
pub async fn summary(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<HelpRequestSummary>> {
    let summary = HelpRequestRepo::summary(&state.pool).await?;
    Ok(Json(summary))
}

/// GET /api/help-requests/my
pub async fn my_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<HelpRequestView>>> {
    let requests = HelpRequestRepo::list_by_user(&state.pool, auth.user_id).await?;
    let count = requests.len() as i64;

    let mut codes = requested_codes(&state, &requests.iter().map(|r| r.id).collect::<Vec<_>>())
        .await?;
    let data = requests
        .into_iter()
        .map(|request| {
            let items = codes.remove(&request.id).unwrap_or_default();
            request.into_view(items, Some(true))
        })
        .collect();

    Ok(Json(ListResponse { data, count }))
}

/// GET /api/help-requests/{id}/inventory
///
/// Per-item needed/donated/pending/remaining rows for one help request.
pub async fn inventory(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<InventoryItemView>>> {
    HelpRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HelpRequest",
            id,
        }))?;

    let rows = InventoryRepo::list_for(&state.pool, InventoryTarget::HelpRequest(id)).await?;
    Ok(Json(rows.into_iter().map(InventoryItemView::from).collect()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Item codes with a declared need, grouped per help request.
async fn requested_codes(
    state: &AppState,
    ids: &[DbId],
) -> AppResult<BTreeMap<DbId, Vec<RationItemType>>> {
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let pairs = InventoryRepo::requested_codes_for_requests(&state.pool, ids).await?;

    let mut grouped: BTreeMap<DbId, Vec<RationItemType>> = BTreeMap::new();
    for (request_id, code) in pairs {
        if let Ok(item) = code.parse::<RationItemType>() {
            grouped.entry(request_id).or_default().push(item);
        }
    }
    Ok(grouped)
}

fn validate_create(input: &CreateHelpRequest) -> AppResult<()> {
    let mut violations = Vec::new();

    if let Err(message) = validate_note(&input.note) {
        violations.push(FieldViolation::new("note", "max_length", message));
    }
    if input.area.trim().is_empty() {
        violations.push(FieldViolation::new(
            "area",
            "is_not_empty",
            "area must not be empty",
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
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    validate_demographics(
        input.total_people,
        input.elders,
        input.children,
        input.pets,
    )
}

fn validate_demographics(
    total_people: Option<i32>,
    elders: Option<i32>,
    children: Option<i32>,
    pets: Option<i32>,
) -> AppResult<()> {
    let fields = [
        ("totalPeople", total_people),
        ("elders", elders),
        ("children", children),
        ("pets", pets),
    ];
    let violations: Vec<FieldViolation> = fields
        .iter()
        .filter(|(_, value)| value.is_some_and(|v| v < 0))
        .map(|(name, _)| {
            FieldViolation::new(*name, "min", format!("{name} must not be negative"))
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}
