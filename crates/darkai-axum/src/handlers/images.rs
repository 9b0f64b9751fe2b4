//! Image generation and gallery handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use darkai_core::GeneratedImage;
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

/// `POST /api/generate-image/`
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateImageRequest>,
) -> Result<(StatusCode, Json<GeneratedImage>), HttpError> {
    let image = state.core.images().generate(&req.prompt).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// `GET /api/images/`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GeneratedImage>>, HttpError> {
    Ok(Json(state.core.images().list(query.limit).await?))
}

/// `GET /api/images/{id}/`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GeneratedImage>, HttpError> {
    Ok(Json(state.core.images().get(id).await?))
}
