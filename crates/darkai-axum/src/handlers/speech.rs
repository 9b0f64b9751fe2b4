//! Text-to-speech handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use darkai_core::{SpeechClip, SpeechRequest};

use crate::error::HttpError;
use crate::state::AppState;

/// `POST /api/text-to-speech/`
pub async fn synthesize(
    State(state): State<AppState>,
    Json(req): Json<SpeechRequest>,
) -> Result<Json<SpeechClip>, HttpError> {
    Ok(Json(state.core.speech().synthesize(&req).await?))
}

/// `GET /api/text-to-speech/languages/` as `{code: name}`.
pub async fn languages(State(state): State<AppState>) -> Json<BTreeMap<&'static str, &'static str>> {
    Json(state.core.speech().supported_languages().iter().copied().collect())
}
