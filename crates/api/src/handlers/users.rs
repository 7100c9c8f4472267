//! Handlers for the `/users` resource (registration).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use reliefnet_core::roles::ROLE_USER;
use reliefnet_db::models::user::CreateUser;
use reliefnet_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::{create_auth_response, AuthResponse};
use crate::state::AppState;

/// Maximum username length in characters.
const MAX_USERNAME_LEN: usize = 40;

/// POST /api/users/register
///
/// Register a new user by username and sign them in immediately. A taken
/// username surfaces as 409 via `uq_users_username`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::field(
            "username",
            "is_not_empty",
            "username must not be empty",
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::field(
            "username",
            "max_length",
            format!("username must be at most {MAX_USERNAME_LEN} characters"),
        ));
    }

    let user = UserRepo::create(&state.pool, username, ROLE_USER).await?;
    let response = create_auth_response(&state, user).await?;

    Ok((StatusCode::CREATED, Json(response)))
}
