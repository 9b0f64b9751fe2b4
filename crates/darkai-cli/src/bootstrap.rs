//! CLI composition root.
//!
//! Commands that need the core go through [`CliContext`]; the wiring
//! itself is shared with the HTTP server.

use std::sync::Arc;

use anyhow::Result;
use darkai_axum::CorsConfig;
use darkai_core::services::AppCore;

use crate::config::Settings;

/// Dependencies available to command handlers.
pub struct CliContext {
    pub core: Arc<AppCore>,
}

/// Build the core from `settings`.
pub async fn bootstrap(settings: &Settings) -> Result<CliContext> {
    let config = settings.server_config(darkai_axum::DEFAULT_PORT, CorsConfig::AllowAll)?;
    let ctx = darkai_axum::bootstrap(&config).await?;
    Ok(CliContext { core: ctx.core })
}
