//! Speech service - chunked synthesis written under the media root.

use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::speech::{
    SUPPORTED_LANGUAGES, TTS_FOLDER, TTS_MAX_CHUNK_CHARS, is_supported_language, split_for_tts,
};
use crate::domain::{SpeechClip, SpeechRequest};
use crate::ports::{CoreError, SpeechSynthesisPort};

/// Service producing MP3 clips from text.
pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesisPort>,
    media_root: PathBuf,
}

impl SpeechService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesisPort>, media_root: PathBuf) -> Self {
        Self {
            synthesizer,
            media_root,
        }
    }

    /// Language codes and display names accepted by [`Self::synthesize`].
    pub fn supported_languages(&self) -> &'static [(&'static str, &'static str)] {
        SUPPORTED_LANGUAGES
    }

    /// Synthesize `request.text` and write it to `{media_root}/tts/{uuid}.mp3`.
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechClip, CoreError> {
        if request.text.trim().is_empty() {
            return Err(CoreError::Validation("No text provided".to_string()));
        }
        let lang = request.language();
        if !is_supported_language(lang) {
            return Err(CoreError::Validation(format!(
                "Language '{lang}' not supported."
            )));
        }

        let chunks = split_for_tts(&request.text, TTS_MAX_CHUNK_CHARS);
        let mut audio = Vec::new();
        for chunk in &chunks {
            // MP3 frames are self-delimiting, so clips concatenate cleanly
            audio.extend(self.synthesizer.synthesize(chunk, lang).await?);
        }

        let dir = self.media_root.join(TTS_FOLDER);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| CoreError::Internal(format!("Cannot create {}: {e}", dir.display())))?;

        let file_name = format!("{}.mp3", Uuid::new_v4());
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|e| CoreError::Internal(format!("Cannot write {}: {e}", path.display())))?;

        tracing::info!(
            target: "darkai.speech",
            lang,
            chunks = chunks.len(),
            bytes = audio.len(),
            file = %file_name,
            "synthesized speech"
        );

        Ok(SpeechClip {
            audio_url: format!("/media/{TTS_FOLDER}/{file_name}"),
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSpeech;

    fn request(text: &str, lang: Option<&str>) -> SpeechRequest {
        SpeechRequest {
            text: text.to_string(),
            lang: lang.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn writes_clip_under_media_root() {
        let dir = tempfile::tempdir().unwrap();
        let speech = Arc::new(FakeSpeech::default());
        let svc = SpeechService::new(speech.clone(), dir.path().to_path_buf());

        let clip = svc.synthesize(&request("hola mundo", None)).await.unwrap();
        assert_eq!(clip.audio_url, format!("/media/tts/{}", clip.file_name));
        assert!(clip.file_name.ends_with(".mp3"));

        let written = std::fs::read(dir.path().join("tts").join(&clip.file_name)).unwrap();
        assert_eq!(written, b"[es:hola mundo]");
        assert_eq!(speech.calls(), vec![("hola mundo".to_string(), "es".to_string())]);
    }

    #[tokio::test]
    async fn long_text_is_synthesized_in_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let speech = Arc::new(FakeSpeech::default());
        let svc = SpeechService::new(speech.clone(), dir.path().to_path_buf());

        let text = "word ".repeat(60);
        let clip = svc.synthesize(&request(&text, Some("en"))).await.unwrap();

        let calls = speech.calls();
        assert!(calls.len() > 1);
        assert!(calls.iter().all(|(chunk, lang)| {
            chunk.chars().count() <= TTS_MAX_CHUNK_CHARS && lang == "en"
        }));

        let written = std::fs::read(dir.path().join("tts").join(&clip.file_name)).unwrap();
        let expected: Vec<u8> = calls
            .iter()
            .flat_map(|(chunk, lang)| format!("[{lang}:{chunk}]").into_bytes())
            .collect();
        assert_eq!(written, expected);
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let svc = SpeechService::new(Arc::new(FakeSpeech::default()), dir.path().to_path_buf());
        let err = svc.synthesize(&request("  ", None)).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m == "No text provided"));
    }

    #[tokio::test]
    async fn unknown_language_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let svc = SpeechService::new(Arc::new(FakeSpeech::default()), dir.path().to_path_buf());
        let err = svc.synthesize(&request("hello", Some("xx"))).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m == "Language 'xx' not supported."));
        assert!(!dir.path().join("tts").exists());
    }

    #[tokio::test]
    async fn vendor_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let svc = SpeechService::new(Arc::new(FakeSpeech::failing()), dir.path().to_path_buf());
        let err = svc.synthesize(&request("hello", Some("en"))).await.unwrap_err();
        assert!(matches!(err, CoreError::ExternalService(_)));
        assert!(!dir.path().join("tts").exists());
    }
}
