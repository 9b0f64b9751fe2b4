//! Text-to-speech domain types: language table and text chunking.

use serde::{Deserialize, Serialize};

/// Language used when a request does not name one.
pub const DEFAULT_TTS_LANGUAGE: &str = "es";

/// Longest text fragment the speech endpoint accepts per request.
pub const TTS_MAX_CHUNK_CHARS: usize = 100;

/// Sub-directory of the media root holding generated audio.
pub const TTS_FOLDER: &str = "tts";

/// Characters preferred as chunk boundaries.
const TTS_PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\u{2026}', '\u{3002}', '\u{ff0c}', '\u{3001}', '\u{ff01}',
    '\u{ff1f}',
];

/// Language codes accepted by the speech backend, with display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fr-CA", "French (Canada)"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("ha", "Hausa"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi (Gurmukhi)"),
    ("pl", "Polish"),
    ("pt", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("yue", "Cantonese"),
    ("zh", "Chinese (Mandarin)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Mandarin/Taiwan)"),
];

/// Whether `code` is in [`SUPPORTED_LANGUAGES`]. Codes are case-sensitive.
#[must_use]
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Incoming speech request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub lang: Option<String>,
}

impl SpeechRequest {
    /// The requested language, or [`DEFAULT_TTS_LANGUAGE`].
    #[must_use]
    pub fn language(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_TTS_LANGUAGE)
    }
}

/// A synthesized clip written to the media root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechClip {
    #[serde(skip_serializing)]
    pub file_name: String,
    pub audio_url: String,
}

/// Split `text` into fragments of at most `max_len` characters.
///
/// Cuts after the last punctuation mark in the window when there is one,
/// otherwise at the last whitespace, otherwise mid-word.
#[must_use]
pub fn split_for_tts(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let Some((window_end, _)) = rest.char_indices().nth(max_len) else {
            chunks.push(rest.to_string());
            break;
        };
        let window = &rest[..window_end];

        let at_punctuation = window
            .char_indices()
            .filter(|(_, c)| TTS_PUNCTUATION.contains(c))
            .map(|(i, c)| i + c.len_utf8())
            .last();
        let at_whitespace = || {
            window
                .char_indices()
                .filter(|(i, c)| *i > 0 && c.is_whitespace())
                .map(|(i, _)| i)
                .last()
        };
        let cut = at_punctuation.or_else(at_whitespace).unwrap_or(window_end);

        let (head, tail) = rest.split_at(cut);
        let head = head.trim();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        rest = tail.trim_start();
    }

    chunks
}
