//! Internal error types for Google API calls.
//!
//! Mapped to the core port errors in `port.rs`.

use thiserror::Error;

pub type GoogleResult<T> = Result<T, GoogleApiError>;

#[derive(Debug, Error)]
pub enum GoogleApiError {
    /// The API answered with a non-success status.
    #[error("Google API request failed with status {status}: {message}")]
    ApiRequestFailed { status: u16, message: String },

    #[error("Invalid response from Google API: {message}")]
    InvalidResponse { message: String },

    /// Gemini call attempted without an API key.
    #[error("GOOGLE_API_KEY is not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl GoogleApiError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// HTTP status for API failures, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human message out of a Google error body.
///
/// Gemini answers `{"error": {"message": ...}}`; userinfo answers
/// `{"error": "...", "error_description": ...}`. Anything else is returned
/// trimmed and truncated.
pub(crate) fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &value["error"];
        if let Some(msg) = error["message"].as_str() {
            return msg.to_string();
        }
        if let Some(desc) = value["error_description"].as_str() {
            return desc.to_string();
        }
        if let Some(msg) = error.as_str() {
            return msg.to_string();
        }
    }
    body.trim().chars().take(200).collect()
}
