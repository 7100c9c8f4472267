//! Handlers for the `/auth` resource (refresh, logout).
//!
//! There is no password login: users register by username (see
//! `handlers::users`) and keep their identity alive through refresh-token
//! rotation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use reliefnet_core::error::CoreError;
use reliefnet_db::models::session::CreateSession;
use reliefnet_db::models::user::User;
use reliefnet_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{issue_access_token, new_refresh_token, refresh_token_hash};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. Tokens
/// rotate: each refresh token works exactly once, and concurrent refreshes
/// with the same token let only the first caller win.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token and find its live session.
    let token_hash = refresh_token_hash(&input.refresh_token);

    let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Revoke it. A false return means another request already consumed
    //    this token.
    let revoked = SessionRepo::revoke(&state.pool, session.id).await?;
    if !revoked {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        )));
    }

    // 3. Re-resolve the user and issue a fresh pair.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response. Shared with registration.
pub(crate) async fn create_auth_response(
    state: &AppState,
    user: User,
) -> AppResult<AuthResponse> {
    let access_token = issue_access_token(user.id, &user.username, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = new_refresh_token();

    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        user,
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
    })
}
