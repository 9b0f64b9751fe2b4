//! Request extractors for token-authenticated routes.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use darkai_core::User;

use crate::error::HttpError;
use crate::state::AppState;

/// Session token from `Authorization: Bearer <token>` or `Token <token>`.
///
/// Missing or malformed headers yield an empty token, which the auth
/// service rejects with its own message.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

fn token_from_header(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    let known = scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token");
    (known && !token.is_empty()).then_some(token)
}

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(token_from_header)
            .unwrap_or_default();
        Ok(Self(token.to_string()))
    }
}

/// The account behind a valid session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;
        let user = state.core.auth().authenticate(&token).await?;
        Ok(Self { user, token })
    }
}
