//! Gemini text and image generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use darkai_core::InlineImage;

use super::GoogleClient;
use crate::error::GoogleResult;
use crate::http::HttpBackend;
use crate::models::{GenerateContentRequest, GenerateContentResponse};

impl<B: HttpBackend> GoogleClient<B> {
    /// Single-turn text generation via `generateContent`.
    ///
    /// Returns an empty string when the model produced no text.
    pub async fn generate_text(&self, prompt: &str) -> GoogleResult<String> {
        let key = self.require_api_key()?;
        let url = self.model_url(&self.text_model, "generateContent")?;
        let body = serde_json::to_value(GenerateContentRequest::user_prompt(prompt))?;

        let response: GenerateContentResponse =
            self.backend().post_json(&url, &body, Some(key)).await?;
        let text = response.first_text();

        tracing::debug!(
            target: "darkai.google",
            model = %self.text_model,
            chars = text.len(),
            "text generation complete"
        );
        Ok(text)
    }

    /// Image generation via `streamGenerateContent`.
    ///
    /// The streamed answer arrives as a JSON array of chunks. Returns the first
    /// part carrying non-empty inline data; text parts are only logged.
    pub async fn generate_image_data(&self, prompt: &str) -> GoogleResult<Option<InlineImage>> {
        let key = self.require_api_key()?;
        let url = self.model_url(&self.image_model, "streamGenerateContent")?;
        let request =
            GenerateContentRequest::user_prompt(prompt).with_modalities(&["IMAGE", "TEXT"]);
        let body = serde_json::to_value(request)?;

        let chunks: Vec<GenerateContentResponse> =
            self.backend().post_json(&url, &body, Some(key)).await?;

        for part in chunks.iter().flat_map(GenerateContentResponse::parts) {
            if let Some(inline) = part.inline_data.as_ref().filter(|d| !d.data.is_empty()) {
                let data = STANDARD.decode(inline.data.trim())?;
                tracing::debug!(
                    target: "darkai.google",
                    model = %self.image_model,
                    mime_type = %inline.mime_type,
                    bytes = data.len(),
                    "image generation complete"
                );
                return Ok(Some(InlineImage {
                    mime_type: inline.mime_type.clone(),
                    data,
                }));
            }
            if let Some(text) = part.text.as_deref() {
                tracing::debug!(target: "darkai.google", text, "image model text part");
            }
        }

        tracing::warn!(
            target: "darkai.google",
            model = %self.image_model,
            chunks = chunks.len(),
            "image model returned no inline data"
        );
        Ok(None)
    }
}
