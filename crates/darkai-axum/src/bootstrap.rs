//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together for
//! the web adapter. All concrete adapters are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use darkai_core::paths::{database_path, ensure_directory, media_root};
use darkai_core::ports::Gateways;
use darkai_core::services::AppCore;
use darkai_db::{CoreFactory, setup_database};
use darkai_google::{DefaultGoogleClient, GoogleConfig};
use darkai_mail::{SmtpConfig, select_mailer};
use darkai_media::{CloudinaryConfig, select_media_store};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Parse a comma-separated origin list; empty input allows all.
    pub fn from_list(origins: &str) -> Self {
        let list: Vec<String> = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if list.is_empty() {
            Self::AllowAll
        } else {
            Self::AllowOrigins(list)
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    pub cors: CorsConfig,
    /// Database file; `None` uses the platform default.
    pub database_path: Option<PathBuf>,
    /// Media root served under `/media`; `None` uses the platform default.
    pub media_root: Option<PathBuf>,
    pub google: GoogleConfig,
    /// `None` stores media on the local filesystem.
    pub cloudinary: Option<CloudinaryConfig>,
    /// `None` logs outgoing mail instead of sending it.
    pub smtp: Option<SmtpConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors: CorsConfig::default(),
            database_path: None,
            media_root: None,
            google: GoogleConfig::default(),
            cloudinary: None,
            smtp: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    #[must_use]
    pub fn with_google(mut self, google: GoogleConfig) -> Self {
        self.google = google;
        self
    }

    #[must_use]
    pub fn with_cloudinary(mut self, cloudinary: Option<CloudinaryConfig>) -> Self {
        self.cloudinary = cloudinary;
        self
    }

    #[must_use]
    pub fn with_smtp(mut self, smtp: Option<SmtpConfig>) -> Self {
        self.smtp = smtp;
        self
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_media_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.media_root = Some(path.into());
        self
    }

    fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(database_path()?),
        }
    }

    fn resolve_media_root(&self) -> Result<PathBuf> {
        match &self.media_root {
            Some(path) => {
                ensure_directory(path)?;
                Ok(path.clone())
            }
            None => Ok(media_root()?),
        }
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
}

impl AxumContext {
    pub const fn new(core: Arc<AppCore>) -> Self {
        Self { core }
    }
}

/// Build every adapter and assemble the core.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let db_path = config.resolve_database_path()?;
    let media_root = config.resolve_media_root()?;

    tracing::info!(
        target: "darkai.paths",
        database_path = %db_path.display(),
        media_root = %media_root.display(),
        "Axum bootstrap resolved paths"
    );

    // 1. Database pool with schema
    let pool = setup_database(&db_path)
        .await
        .with_context(|| format!("opening database at {}", db_path.display()))?;

    // 2. Google client backs text, image, speech and identity
    let google = Arc::new(DefaultGoogleClient::new(&config.google)?);
    if !google.has_api_key() {
        tracing::warn!(
            target: "darkai.google",
            "GOOGLE_API_KEY not set; chat and image generation will fail"
        );
    }

    // 3. Storage and mail
    let media = select_media_store(config.cloudinary.clone(), media_root.clone())?;
    let mailer = select_mailer(config.smtp.as_ref())?;

    let gateways = Gateways {
        text: google.clone(),
        images: google.clone(),
        speech: google.clone(),
        media,
        mailer,
        identity: google,
    };

    // 4. Core
    let core = Arc::new(CoreFactory::build_app_core(pool, gateways, media_root));
    Ok(AxumContext::new(core))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(target: "darkai.http", "Dark AI API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!(target: "darkai.http", "shutdown signal received");
    }
}
