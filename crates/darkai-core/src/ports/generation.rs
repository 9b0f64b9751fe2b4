//! Generative model ports (text and image).
//!
//! The implementation lives in `darkai-google`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::InlineImage;

/// Errors from generative model calls.
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network or connectivity error.
    #[error("Generation request failed: {0}")]
    Network(String),

    /// The vendor answered with an error status.
    #[error("Generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The vendor answered with something unparseable.
    #[error("Invalid generation response: {0}")]
    InvalidResponse(String),

    /// Missing API key or model name.
    #[error("{0}")]
    Configuration(String),
}

/// Port for single-turn text generation.
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// Generate a reply for `prompt`.
    ///
    /// Returns an empty string when the model produced no text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Port for image generation.
#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    /// Generate an image for `prompt`.
    ///
    /// Returns `Ok(None)` when the model answered without any inline image
    /// (e.g. it only produced text).
    async fn generate_image(&self, prompt: &str) -> Result<Option<InlineImage>, GenerationError>;
}
