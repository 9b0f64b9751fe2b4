//! HTTP backend abstraction for Google APIs.
//!
//! The client is generic over [`HttpBackend`] so tests can swap in
//! [`testing::FakeBackend`]. The production backend is reqwest with
//! exponential backoff on server and network errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::GoogleConfig;
use crate::error::{GoogleApiError, GoogleResult, extract_error_message};

/// Header carrying the Gemini API key.
pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Minimal HTTP surface the Google client needs.
///
/// This is an implementation detail; consumers use the core ports.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body, optionally authenticated with an API key header.
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &serde_json::Value,
        api_key: Option<&str>,
    ) -> GoogleResult<T>;

    /// GET a JSON document, optionally with a bearer token.
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        bearer: Option<&str>,
    ) -> GoogleResult<T>;

    /// GET a raw body.
    async fn get_bytes(&self, url: &Url) -> GoogleResult<Vec<u8>>;
}

/// Production backend using reqwest with retry logic.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    pub fn new(config: &GoogleConfig) -> GoogleResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    fn backoff(&self, attempt: u8) -> Duration {
        self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1)
    }

    /// Send the request built by `build`, retrying transient failures.
    async fn send_with_retry<F>(&self, url: &Url, build: F) -> GoogleResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_error: Option<GoogleApiError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(self.backoff(attempt)).await;
            }

            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let body = response.text().await.unwrap_or_default();
                    let error = GoogleApiError::ApiRequestFailed {
                        status: status.as_u16(),
                        message: extract_error_message(&body),
                    };

                    // 5xx is retryable; 4xx or the final attempt fails now
                    if status.is_server_error() && attempt < self.max_retries {
                        tracing::debug!(
                            target: "darkai.google",
                            url = %redact(url),
                            status = status.as_u16(),
                            attempt,
                            "retrying after server error"
                        );
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tracing::debug!(
                            target: "darkai.google",
                            url = %redact(url),
                            attempt,
                            error = %e,
                            "retrying after network error"
                        );
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GoogleApiError::invalid("Unknown error during request")))
    }
}

/// URL without its query string, for logs (TTS queries carry user text).
fn redact(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &serde_json::Value,
        api_key: Option<&str>,
    ) -> GoogleResult<T> {
        let response = self
            .send_with_retry(url, || {
                let request = self.client.post(url.as_str()).json(body);
                match api_key {
                    Some(key) => request.header(API_KEY_HEADER, key),
                    None => request,
                }
            })
            .await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        bearer: Option<&str>,
    ) -> GoogleResult<T> {
        let response = self
            .send_with_retry(url, || {
                let request = self.client.get(url.as_str());
                match bearer {
                    Some(token) => request.bearer_auth(token),
                    None => request,
                }
            })
            .await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_bytes(&self, url: &Url) -> GoogleResult<Vec<u8>> {
        let response = self
            .send_with_retry(url, || self.client.get(url.as_str()))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned response for the fake backend.
    #[derive(Clone, Debug)]
    pub enum CannedResponse {
        Json(serde_json::Value),
        Bytes(Vec<u8>),
        Status { status: u16, body: String },
    }

    /// A request the fake backend received.
    #[derive(Clone, Debug)]
    pub struct RecordedRequest {
        pub url: Url,
        pub body: Option<serde_json::Value>,
        pub api_key: Option<String>,
        pub bearer: Option<String>,
    }

    /// Returns canned responses keyed by URL substring and records requests.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer URLs containing `url_contains` with `response`. First match wins.
        pub fn with_response(mut self, url_contains: &str, response: CannedResponse) -> Self {
            self.responses.push((url_contains.to_string(), response));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn respond(&self, request: RecordedRequest) -> GoogleResult<CannedResponse> {
            let url = request.url.to_string();
            self.requests.lock().unwrap().push(request);
            let response = self
                .responses
                .iter()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
                .ok_or_else(|| GoogleApiError::ApiRequestFailed {
                    status: 404,
                    message: format!("no canned response for {url}"),
                })?;
            match response {
                CannedResponse::Status { status, body } => Err(GoogleApiError::ApiRequestFailed {
                    status,
                    message: extract_error_message(&body),
                }),
                other => Ok(other),
            }
        }

        fn decode<T: DeserializeOwned>(response: CannedResponse) -> GoogleResult<T> {
            match response {
                CannedResponse::Json(json) => Ok(serde_json::from_value(json)?),
                CannedResponse::Bytes(bytes) => Ok(serde_json::from_slice(&bytes)?),
                CannedResponse::Status { .. } => unreachable!("status responses are errors"),
            }
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn post_json<T: DeserializeOwned + Send>(
            &self,
            url: &Url,
            body: &serde_json::Value,
            api_key: Option<&str>,
        ) -> GoogleResult<T> {
            let response = self.respond(RecordedRequest {
                url: url.clone(),
                body: Some(body.clone()),
                api_key: api_key.map(str::to_string),
                bearer: None,
            })?;
            Self::decode(response)
        }

        async fn get_json<T: DeserializeOwned + Send>(
            &self,
            url: &Url,
            bearer: Option<&str>,
        ) -> GoogleResult<T> {
            let response = self.respond(RecordedRequest {
                url: url.clone(),
                body: None,
                api_key: None,
                bearer: bearer.map(str::to_string),
            })?;
            Self::decode(response)
        }

        async fn get_bytes(&self, url: &Url) -> GoogleResult<Vec<u8>> {
            let response = self.respond(RecordedRequest {
                url: url.clone(),
                body: None,
                api_key: None,
                bearer: None,
            })?;
            match response {
                CannedResponse::Bytes(bytes) => Ok(bytes),
                CannedResponse::Json(json) => Ok(serde_json::to_vec(&json)?),
                CannedResponse::Status { .. } => unreachable!("status responses are errors"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn reqwest_backend_uses_config() {
        let config = GoogleConfig::new()
            .with_max_retries(4)
            .with_retry_delay(Duration::from_millis(100));
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 4);
        assert_eq!(backend.backoff(1), Duration::from_millis(100));
        assert_eq!(backend.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn redact_strips_query() {
        let url = Url::parse("https://translate.google.com/translate_tts?q=secret&tl=es").unwrap();
        assert_eq!(redact(&url), "https://translate.google.com/translate_tts");
    }

    #[tokio::test]
    async fn fake_backend_returns_canned_json() {
        let backend = FakeBackend::new()
            .with_response("userinfo", CannedResponse::Json(json!({"email": "a@b.co"})));
        let url = Url::parse("https://example.com/userinfo").unwrap();

        let value: serde_json::Value = backend.get_json(&url, Some("tok")).await.unwrap();
        assert_eq!(value["email"], "a@b.co");
        assert_eq!(backend.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn fake_backend_unknown_url_is_404() {
        let backend = FakeBackend::new();
        let url = Url::parse("https://example.com/unknown").unwrap();

        let result = backend.get_bytes(&url).await;
        assert!(matches!(
            result,
            Err(GoogleApiError::ApiRequestFailed { status: 404, .. })
        ));
    }
}
