//! Google Translate text-to-speech.

use url::Url;

use super::GoogleClient;
use crate::error::{GoogleApiError, GoogleResult};
use crate::http::HttpBackend;

impl<B: HttpBackend> GoogleClient<B> {
    fn tts_request_url(&self, text: &str, lang: &str) -> Url {
        let mut url = self.tts_url.clone();
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("client", "tw-ob")
            .append_pair("tl", lang)
            .append_pair("q", text)
            .append_pair("total", "1")
            .append_pair("idx", "0")
            .append_pair("textlen", &text.chars().count().to_string());
        url
    }

    /// Fetch MP3 audio for one short fragment.
    pub async fn speak(&self, text: &str, lang: &str) -> GoogleResult<Vec<u8>> {
        let url = self.tts_request_url(text, lang);
        let audio = self.backend().get_bytes(&url).await?;
        if audio.is_empty() {
            return Err(GoogleApiError::invalid("empty audio body"));
        }
        tracing::debug!(target: "darkai.google", lang, bytes = audio.len(), "tts chunk fetched");
        Ok(audio)
    }
}
