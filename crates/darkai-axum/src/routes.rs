//! Route definitions and router construction.
//!
//! Paths keep the trailing slashes the frontend already calls.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All API routes without the `/api` prefix.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ping/", get(handlers::system::ping))
        // Chat
        .route("/chat/", post(handlers::chat::send))
        // Images
        .route("/generate-image/", post(handlers::images::generate))
        .route("/images/", get(handlers::images::list))
        .route("/images/{id}/", get(handlers::images::get))
        // Speech
        .route("/text-to-speech/", post(handlers::speech::synthesize))
        .route(
            "/text-to-speech/languages/",
            get(handlers::speech::languages),
        )
        // Accounts
        .route("/auth/", post(handlers::auth::action))
        .route("/auth/google/", post(handlers::auth::google))
        .route("/auth/me/", get(handlers::auth::me))
        .route("/logout/", post(handlers::auth::logout))
}

/// Create the main router: `/health`, `/api/*` and static `/media/*`.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let media = ServeDir::new(ctx.core.media_root());
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(handlers::system::health))
        .nest("/api", api_routes().with_state(state))
        .nest_service("/media", media)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
