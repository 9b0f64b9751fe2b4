//! Google API client.
//!
//! One client backs four core ports; the per-API request logic lives in
//! the submodules.

mod gemini;
mod tts;
mod userinfo;

use url::Url;

use crate::config::GoogleConfig;
use crate::error::{GoogleApiError, GoogleResult};
use crate::http::{HttpBackend, ReqwestBackend};

/// Google API client, generic over the HTTP backend.
///
/// Use [`DefaultGoogleClient`] in production.
pub struct GoogleClient<B: HttpBackend> {
    backend: B,
    api_key: Option<String>,
    text_model: String,
    image_model: String,
    gemini_base: Url,
    tts_url: Url,
    userinfo_url: Url,
}

/// Client with the production reqwest backend.
pub type DefaultGoogleClient = GoogleClient<ReqwestBackend>;

impl DefaultGoogleClient {
    /// Create a client from public configuration.
    pub fn new(config: &GoogleConfig) -> GoogleResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Self::with_backend(backend, config)
    }
}

impl<B: HttpBackend> GoogleClient<B> {
    /// Create a client with a custom backend (tests, proxies).
    pub fn with_backend(backend: B, config: &GoogleConfig) -> GoogleResult<Self> {
        Ok(Self {
            backend,
            api_key: config.api_key.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            gemini_base: Url::parse(config.gemini_base_url.trim_end_matches('/'))?,
            tts_url: Url::parse(&config.tts_url)?,
            userinfo_url: Url::parse(&config.userinfo_url)?,
        })
    }

    /// Whether Gemini calls can be made.
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) const fn backend(&self) -> &B {
        &self.backend
    }

    fn require_api_key(&self) -> GoogleResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(GoogleApiError::MissingApiKey)
    }

    /// `{base}/models/{model}:{method}`
    fn model_url(&self, model: &str, method: &str) -> GoogleResult<Url> {
        let base = self.gemini_base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/models/{model}:{method}"))?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::http::testing::FakeBackend;

    #[test]
    fn model_url_shape() {
        let client = client(FakeBackend::new());
        let url = client
            .model_url("gemini-2.0-flash", "generateContent")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = crate::GoogleConfig::new().with_gemini_base_url("not a url");
        assert!(super::GoogleClient::with_backend(FakeBackend::new(), &config).is_err());
    }

    #[test]
    fn api_key_presence() {
        assert!(client(FakeBackend::new()).has_api_key());
        assert!(!keyless_client(FakeBackend::new()).has_api_key());
    }
}
