//! Account handlers: OTP signup flow, Google login, profile, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use darkai_core::{AuthAction, AuthOutcome, UserProfile};
use serde::Deserialize;

use crate::error::HttpError;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub access_token: String,
}

/// `POST /api/auth/` dispatching on `action`. Signup answers 201.
pub async fn action(
    State(state): State<AppState>,
    Json(action): Json<AuthAction>,
) -> Result<(StatusCode, Json<AuthOutcome>), HttpError> {
    let status = if matches!(action, AuthAction::Signup { .. }) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let outcome = state.core.auth().handle(action).await?;
    Ok((status, Json(outcome)))
}

/// `POST /api/auth/google/`
pub async fn google(
    State(state): State<AppState>,
    Json(req): Json<GoogleLoginRequest>,
) -> Result<Json<AuthOutcome>, HttpError> {
    Ok(Json(state.core.auth().google_login(&req.access_token).await?))
}

/// `GET /api/auth/me/`
pub async fn me(current: CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&current.user))
}

/// `POST /api/logout/`
///
/// Needs a live session; repeating it with the same token answers 401.
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<AuthOutcome>, HttpError> {
    Ok(Json(state.core.auth().logout(&current.token).await?))
}

