//! Handlers for the `/clubs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reliefnet_core::error::CoreError;
use reliefnet_core::types::DbId;
use reliefnet_db::models::club::{ClubMembership, CreateVolunteerClub, VolunteerClub};
use reliefnet_db::repositories::ClubRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/clubs
///
/// Register a club with the caller as its linked user.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateVolunteerClub>,
) -> AppResult<(StatusCode, Json<VolunteerClub>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::field(
            "name",
            "is_not_empty",
            "name must not be empty",
        ));
    }

    let club = ClubRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

/// GET /api/clubs
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VolunteerClub>>> {
    let clubs = ClubRepo::list(&state.pool).await?;
    Ok(Json(clubs))
}

/// GET /api/clubs/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VolunteerClub>> {
    let club = ClubRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VolunteerClub",
            id,
        }))?;
    Ok(Json(club))
}

/// GET /api/clubs/{id}/members
pub async fn members(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ClubMembership>>> {
    ClubRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VolunteerClub",
            id,
        }))?;

    let members = ClubRepo::list_members(&state.pool, id).await?;
    Ok(Json(members))
}
