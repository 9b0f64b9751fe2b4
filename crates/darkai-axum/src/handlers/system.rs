//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// Plain-text health check outside `/api`.
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /api/ping/`
pub async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
