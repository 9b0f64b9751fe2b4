//! Chat handler.

use axum::Json;
use axum::extract::State;
use darkai_core::{ChatReply, ChatRequest};

use crate::error::HttpError;
use crate::state::AppState;

/// `POST /api/chat/`
pub async fn send(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, HttpError> {
    Ok(Json(state.core.chat().reply(&req).await?))
}
