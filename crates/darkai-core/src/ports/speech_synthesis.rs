//! Text-to-speech port.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from speech synthesis calls.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Speech request failed: {0}")]
    Network(String),

    #[error("Speech API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Speech API returned no audio")]
    EmptyAudio,
}

/// Port for turning a short text fragment into MP3 audio.
///
/// Callers split long text first; implementations may reject fragments
/// longer than [`TTS_MAX_CHUNK_CHARS`](crate::domain::speech::TTS_MAX_CHUNK_CHARS).
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Synthesize `text` spoken in `lang`, returning MP3 bytes.
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError>;
}
