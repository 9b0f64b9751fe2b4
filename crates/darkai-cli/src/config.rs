//! Settings shared by every command, read from flags or the environment.

use std::path::PathBuf;

use clap::Args;
use darkai_axum::{CorsConfig, ServerConfig};
use darkai_google::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GoogleConfig};
use darkai_mail::{DEFAULT_SMTP_PORT, SmtpConfig};
use darkai_media::CloudinaryConfig;

use crate::error::CliError;

/// Vendor credentials and storage locations.
#[derive(Args, Debug, Clone, Default)]
pub struct Settings {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    pub google_api_key: Option<String>,

    /// Gemini model for chat replies
    #[arg(long, env = "GEMINI_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL, global = true)]
    pub text_model: String,

    /// Gemini model for image generation
    #[arg(long, env = "GEMINI_IMAGE_MODEL", default_value = DEFAULT_IMAGE_MODEL, global = true)]
    pub image_model: String,

    #[arg(long, env = "CLOUDINARY_CLOUD_NAME", global = true)]
    pub cloudinary_cloud_name: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_KEY", hide_env_values = true, global = true)]
    pub cloudinary_api_key: Option<String>,

    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true, global = true)]
    pub cloudinary_api_secret: Option<String>,

    /// SMTP relay; without it OTP emails are only logged
    #[arg(long, env = "SMTP_HOST", global = true)]
    pub smtp_host: Option<String>,

    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT, global = true)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USERNAME", global = true)]
    pub smtp_username: Option<String>,

    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true, global = true)]
    pub smtp_password: Option<String>,

    /// Sender address; defaults to the SMTP username
    #[arg(long, env = "MAIL_FROM", global = true)]
    pub mail_from: Option<String>,

    /// Root for the database and default media directory
    #[arg(long, env = "DARKAI_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory served under /media
    #[arg(long, env = "DARKAI_MEDIA_DIR", global = true)]
    pub media_dir: Option<PathBuf>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

impl Settings {
    pub fn google_config(&self) -> GoogleConfig {
        GoogleConfig::new()
            .with_optional_api_key(self.google_api_key.clone())
            .with_text_model(self.text_model.clone())
            .with_image_model(self.image_model.clone())
    }

    /// Cloudinary settings when all three credentials are present.
    pub fn cloudinary_config(&self) -> Option<CloudinaryConfig> {
        CloudinaryConfig::from_parts(
            self.cloudinary_cloud_name.clone(),
            self.cloudinary_api_key.clone(),
            self.cloudinary_api_secret.clone(),
        )
    }

    /// SMTP settings when a host is configured.
    pub fn smtp_config(&self) -> Result<Option<SmtpConfig>, CliError> {
        let Some(host) = non_blank(self.smtp_host.as_ref()) else {
            return Ok(None);
        };
        let from = non_blank(self.mail_from.as_ref())
            .or_else(|| non_blank(self.smtp_username.as_ref()))
            .ok_or_else(|| {
                CliError::Config("MAIL_FROM or SMTP_USERNAME is required with SMTP_HOST".into())
            })?;

        let mut config = SmtpConfig::new(host, from).with_port(self.smtp_port);
        if let (Some(user), Some(pass)) = (
            non_blank(self.smtp_username.as_ref()),
            self.smtp_password.clone(),
        ) {
            config = config.with_credentials(user, pass);
        }
        Ok(Some(config))
    }

    /// Full server configuration for `port` and `cors`.
    pub fn server_config(&self, port: u16, cors: CorsConfig) -> Result<ServerConfig, CliError> {
        let mut config = ServerConfig::default()
            .with_port(port)
            .with_google(self.google_config())
            .with_cloudinary(self.cloudinary_config())
            .with_smtp(self.smtp_config()?);
        config.cors = cors;

        if let Some(path) = self.database_path() {
            config = config.with_database_path(path);
        }
        if let Some(path) = self.media_root() {
            config = config.with_media_root(path);
        }
        Ok(config)
    }

    /// Database file under `--data-dir`, if given.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join("data").join("darkai.db"))
    }

    /// `--media-dir`, else `media` under `--data-dir`.
    pub fn media_root(&self) -> Option<PathBuf> {
        self.media_dir
            .clone()
            .or_else(|| self.data_dir.as_ref().map(|dir| dir.join("media")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            text_model: DEFAULT_TEXT_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
            smtp_port: DEFAULT_SMTP_PORT,
            ..Default::default()
        }
    }

    #[test]
    fn cloudinary_needs_all_credentials() {
        let mut s = settings();
        s.cloudinary_cloud_name = Some("demo".into());
        s.cloudinary_api_key = Some("key".into());
        assert!(s.cloudinary_config().is_none());
        s.cloudinary_api_secret = Some("secret".into());
        assert!(s.cloudinary_config().is_some());
    }

    #[test]
    fn smtp_absent_without_host() {
        assert!(settings().smtp_config().unwrap().is_none());
    }

    #[test]
    fn smtp_sender_falls_back_to_username() {
        let mut s = settings();
        s.smtp_host = Some("smtp.example.com".into());
        assert!(matches!(s.smtp_config(), Err(CliError::Config(_))));

        s.smtp_username = Some("bot@example.com".into());
        s.smtp_password = Some("pw".into());
        let config = s.smtp_config().unwrap().unwrap();
        assert_eq!(config.from, "bot@example.com");
        assert_eq!(config.port, 587);
        assert_eq!(config.username.as_deref(), Some("bot@example.com"));
    }

    #[test]
    fn data_dir_places_database_and_media() {
        let mut s = settings();
        s.data_dir = Some(PathBuf::from("/srv/darkai"));
        let config = s.server_config(9000, CorsConfig::AllowAll).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/srv/darkai/data/darkai.db"))
        );
        assert_eq!(config.media_root, Some(PathBuf::from("/srv/darkai/media")));

        s.media_dir = Some(PathBuf::from("/var/www/media"));
        let config = s.server_config(9000, CorsConfig::AllowAll).unwrap();
        assert_eq!(config.media_root, Some(PathBuf::from("/var/www/media")));
    }

    #[test]
    fn blank_api_key_is_absent() {
        let mut s = settings();
        s.google_api_key = Some(String::new());
        assert!(s.google_config().api_key.is_none());
    }
}
