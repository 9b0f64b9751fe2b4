//! Cloudinary account settings.

use std::time::Duration;

/// Default Cloudinary API base.
pub const DEFAULT_CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

/// Credentials and endpoint for signed Cloudinary uploads.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_base_url: DEFAULT_CLOUDINARY_API.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Build a config only when all three credentials are present and non-blank.
    pub fn from_parts(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(Self::new(
            present(cloud_name)?,
            present(api_key)?,
            present(api_secret)?,
        ))
    }

    /// Point uploads at a different API base (mock servers).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base}/{cloud}/image/upload`
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}
