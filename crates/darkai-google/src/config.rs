//! Public configuration for the Google client.

use std::time::Duration;

/// Default Gemini REST base.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Translate TTS endpoint.
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Default OAuth2 userinfo endpoint.
pub const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Default chat model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Configuration for [`GoogleClient`](crate::GoogleClient).
///
/// # Example
///
/// ```rust
/// use darkai_google::GoogleConfig;
/// use std::time::Duration;
///
/// let config = GoogleConfig::new()
///     .with_api_key("AIza-test")
///     .with_timeout(Duration::from_secs(60));
/// assert_eq!(config.api_key.as_deref(), Some("AIza-test"));
/// ```
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Gemini API key (`GOOGLE_API_KEY`). Required for generation only.
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub gemini_base_url: String,
    pub tts_url: String,
    pub userinfo_url: String,
    pub user_agent: String,
    /// Per-request timeout. Image generation can be slow.
    pub timeout: Duration,
    /// Retry attempts for 5xx and network errors.
    pub max_retries: u8,
    pub retry_base_delay: Duration,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            tts_url: DEFAULT_TTS_URL.to_string(),
            userinfo_url: DEFAULT_USERINFO_URL.to_string(),
            user_agent: format!("darkai/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl GoogleConfig {
    /// Create a configuration with default endpoints and no API key.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API key only if one is provided; blank keys count as absent.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Override the Gemini base URL (mock servers, proxies).
    #[must_use]
    pub fn with_gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_tts_url(mut self, url: impl Into<String>) -> Self {
        self.tts_url = url.into();
        self
    }

    #[must_use]
    pub fn with_userinfo_url(mut self, url: impl Into<String>) -> Self {
        self.userinfo_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Base delay for exponential backoff. Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
