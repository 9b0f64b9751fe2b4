//! Serve command handler.

use anyhow::Result;
use darkai_axum::{CorsConfig, start_server};

use crate::config::Settings;

/// Run the HTTP API until Ctrl-C.
pub async fn execute(settings: &Settings, port: u16, cors_origins: Option<&str>) -> Result<()> {
    let cors = cors_origins.map_or(CorsConfig::AllowAll, CorsConfig::from_list);
    let config = settings.server_config(port, cors)?;
    start_server(config).await
}
