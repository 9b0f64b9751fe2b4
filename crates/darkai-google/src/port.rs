//! Core port implementations for [`GoogleClient`].
//!
//! Internal [`GoogleApiError`]s are mapped to the port error of each trait.

use async_trait::async_trait;
use darkai_core::{
    GenerationError, IdentityError, IdentityPort, ImageGenerationPort, InlineImage,
    SocialIdentity, SpeechSynthesisPort, SynthesisError, TextGenerationPort,
};

use crate::client::GoogleClient;
use crate::error::GoogleApiError;
use crate::http::HttpBackend;

fn map_generation_error(err: GoogleApiError) -> GenerationError {
    match err {
        GoogleApiError::ApiRequestFailed { status, message } => {
            GenerationError::Api { status, message }
        }
        GoogleApiError::MissingApiKey | GoogleApiError::InvalidUrl(_) => {
            GenerationError::Configuration(err.to_string())
        }
        GoogleApiError::Network(e) => GenerationError::Network(e.to_string()),
        GoogleApiError::InvalidResponse { .. }
        | GoogleApiError::JsonParse(_)
        | GoogleApiError::Base64(_) => GenerationError::InvalidResponse(err.to_string()),
    }
}

fn map_synthesis_error(err: GoogleApiError) -> SynthesisError {
    match err {
        GoogleApiError::ApiRequestFailed { status, message } => {
            SynthesisError::Api { status, message }
        }
        GoogleApiError::InvalidResponse { .. } => SynthesisError::EmptyAudio,
        other => SynthesisError::Network(other.to_string()),
    }
}

fn map_identity_error(err: GoogleApiError) -> IdentityError {
    match err {
        GoogleApiError::ApiRequestFailed {
            status: 400 | 401 | 403,
            ..
        } => IdentityError::InvalidToken,
        GoogleApiError::InvalidResponse { .. } | GoogleApiError::JsonParse(_) => {
            IdentityError::InvalidResponse(err.to_string())
        }
        other => IdentityError::Network(other.to_string()),
    }
}

#[async_trait]
impl<B: HttpBackend + 'static> TextGenerationPort for GoogleClient<B> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.generate_text(prompt)
            .await
            .map_err(map_generation_error)
    }
}

#[async_trait]
impl<B: HttpBackend + 'static> ImageGenerationPort for GoogleClient<B> {
    async fn generate_image(&self, prompt: &str) -> Result<Option<InlineImage>, GenerationError> {
        self.generate_image_data(prompt)
            .await
            .map_err(map_generation_error)
    }
}

#[async_trait]
impl<B: HttpBackend + 'static> SpeechSynthesisPort for GoogleClient<B> {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
        self.speak(text, lang).await.map_err(map_synthesis_error)
    }
}

#[async_trait]
impl<B: HttpBackend + 'static> IdentityPort for GoogleClient<B> {
    async fn fetch_google_identity(
        &self,
        access_token: &str,
    ) -> Result<SocialIdentity, IdentityError> {
        self.user_identity(access_token)
            .await
            .map_err(map_identity_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{client, keyless_client};
    use crate::http::testing::{CannedResponse, FakeBackend};
    use std::sync::Arc;

    #[test]
    fn generation_error_mapping() {
        assert!(matches!(
            map_generation_error(GoogleApiError::MissingApiKey),
            GenerationError::Configuration(_)
        ));
        assert!(matches!(
            map_generation_error(GoogleApiError::ApiRequestFailed {
                status: 503,
                message: "overloaded".into()
            }),
            GenerationError::Api { status: 503, .. }
        ));
        assert!(matches!(
            map_generation_error(GoogleApiError::invalid("bad")),
            GenerationError::InvalidResponse(_)
        ));
    }

    #[test]
    fn identity_rejections_become_invalid_token() {
        for status in [400, 401, 403] {
            assert!(matches!(
                map_identity_error(GoogleApiError::ApiRequestFailed {
                    status,
                    message: String::new()
                }),
                IdentityError::InvalidToken
            ));
        }
        assert!(matches!(
            map_identity_error(GoogleApiError::ApiRequestFailed {
                status: 500,
                message: String::new()
            }),
            IdentityError::Network(_)
        ));
    }

    #[test]
    fn empty_audio_maps_to_empty_audio() {
        assert!(matches!(
            map_synthesis_error(GoogleApiError::invalid("empty audio body")),
            SynthesisError::EmptyAudio
        ));
    }

    #[tokio::test]
    async fn client_serves_as_core_ports() {
        let backend = FakeBackend::new()
            .with_response(
                "generateContent",
                CannedResponse::Json(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
                })),
            )
            .with_response("translate_tts", CannedResponse::Bytes(vec![1, 2, 3]));
        let client = Arc::new(client(backend));

        let text: Arc<dyn TextGenerationPort> = client.clone();
        let speech: Arc<dyn SpeechSynthesisPort> = client;

        assert_eq!(text.generate("hi").await.unwrap(), "ok");
        assert_eq!(speech.synthesize("hola", "es").await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn keyless_generation_is_configuration_error() {
        let client = keyless_client(FakeBackend::new());
        let err = client.generate_image("a cat").await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }

    #[tokio::test]
    async fn rejected_token_is_invalid_token() {
        let backend = FakeBackend::new().with_response(
            "userinfo",
            CannedResponse::Status {
                status: 401,
                body: r#"{"error":"invalid_token"}"#.into(),
            },
        );
        let err = keyless_client(backend)
            .fetch_google_identity("expired")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken));
    }
}
