//! Chat domain: canned persona replies, code-intent detection, prompt
//! construction and response cleanup.
//!
//! Everything here is pure. The vendor call itself lives behind
//! [`TextGenerationPort`](crate::ports::TextGenerationPort) and is driven by
//! [`ChatService`](crate::services::ChatService).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reply used when the text model returns nothing.
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response.";

/// Substrings that mark a message as a request for code.
pub const CODE_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "code",
    "program",
    "script",
    "function",
    "write a function",
    "generate code",
];

/// Identity questions answered locally instead of by the text model.
///
/// Declaration order is match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Creator,
    Identity,
    Model,
    Training,
    Purpose,
    Owner,
}

impl Intent {
    /// All intents in match priority order.
    pub const ALL: [Self; 6] = [
        Self::Creator,
        Self::Identity,
        Self::Model,
        Self::Training,
        Self::Purpose,
        Self::Owner,
    ];

    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Identity => "identity",
            Self::Model => "model",
            Self::Training => "training",
            Self::Purpose => "purpose",
            Self::Owner => "owner",
        }
    }

    /// Trigger phrases, matched as whole words against the lower-cased message.
    ///
    /// Misspellings are deliberate: they are what users actually type.
    #[must_use]
    pub const fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Creator => &[
                "who made you",
                "who create you",
                "who created you",
                "who develop you",
                "who developed you",
                "who build you",
                "who built you",
                "who generated you",
                "who generate you",
                "who genrated you",
                "who genrate you",
                "who genarated you",
                "who genarate you",
                "who creater you",
                "who creted you",
                "who desined you",
                "who desinged you",
                "who programmed you",
                "who program you",
                "who founded you",
                "who founder you",
                "who is your creator",
                "who is your ceo",
                "who is your founder",
                "who is your owner",
                "who is your boss",
                "who is your developer",
            ],
            Self::Identity => &[
                "what's your name",
                "what is your name",
                "who are you",
                "what can i call you",
                "what is your identity",
                "what is your chatbot name",
                "do you have a name",
                "whats your name",
                "whats ur name",
                "what's ur name",
                "tell me your name",
                "your name please",
                "name please",
                "ur name",
            ],
            Self::Model => &[
                "what's your model",
                "what is your model",
                "which ai model are you",
                "what version are you",
                "tell me your version",
                "are you gpt",
                "are you gemini",
                "which model you are",
                "what is your ai model",
                "what type of ai you are",
                "what model ai you are",
            ],
            Self::Training => &[
                "who trained you",
                "what trained you",
                "where does your knowledge come from",
                "what data were you trained on",
                "who taught you",
                "how do you know things",
                "who learn you",
                "who teached you",
                "who gives you knowledge",
                "how you learn",
            ],
            Self::Purpose => &[
                "why were you made",
                "what is your purpose",
                "what can you do",
                "why do you exist",
                "what's your job",
                "what are you capable of",
                "what you can do",
                "what you are made for",
                "what is your work",
                "what you are used for",
            ],
            Self::Owner => &[
                "who owns you",
                "who is your boss",
                "who controls you",
                "who is your company",
                "who is your owner",
                "who have you",
                "who is your handler",
                "who is your parent company",
                "who manage you",
                "who is the owner of dark ai",
            ],
        }
    }

    /// The canned reply for this intent.
    #[must_use]
    pub const fn reply(&self) -> &'static str {
        match self {
            Self::Creator => {
                "I was created by Bhavya, the visionary CEO of Dark AI. I'm here to assist you with whatever you need!"
            }
            Self::Identity => {
                "I am Dark AI, your personal AI assistant created by Bhavya. Feel free to call me Dark AI!"
            }
            Self::Model => {
                "I am a unique AI model known as Dark AI, custom-built by Bhavya. I'm not GPT or Gemini, I'm something special!"
            }
            Self::Training => {
                "I was trained with carefully selected knowledge and data, curated by Bhavya. My responses are designed to serve you better every day."
            }
            Self::Purpose => {
                "I was created by Bhavya to assist, inform, and engage you. My purpose is to make your experience smoother and smarter!"
            }
            Self::Owner => {
                "I am fully owned and managed by Bhavya, the CEO of Dark AI. There's no big tech company behind me, just Bhavya's brilliant vision."
            }
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alternation pattern per intent, in priority order.
static INTENT_PATTERNS: LazyLock<Vec<(Intent, Regex)>> = LazyLock::new(|| {
    Intent::ALL
        .iter()
        .map(|intent| {
            let alternation = intent
                .keywords()
                .iter()
                .map(|kw| regex::escape(kw))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"\b(?:{alternation})\b"))
                .expect("intent keyword pattern is valid");
            (*intent, pattern)
        })
        .collect()
});

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"));
static LEADING_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+").expect("leading whitespace pattern is valid"));

/// Find the first intent whose keywords appear in `message`.
#[must_use]
pub fn detect_intent(message: &str) -> Option<Intent> {
    let lowered = message.to_lowercase();
    INTENT_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(intent, _)| *intent)
}

/// Canned reply for `message`, if it asks about the assistant itself.
#[must_use]
pub fn detect_canned_reply(message: &str) -> Option<(Intent, &'static str)> {
    detect_intent(message).map(|intent| (intent, intent.reply()))
}

/// Whether `message` looks like a request for code.
#[must_use]
pub fn is_code_request(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CODE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Build the prompt sent to the text model.
#[must_use]
pub fn build_prompt(message: &str, is_code: bool) -> String {
    if is_code {
        format!(
            "You are a coding assistant.\n\
             \n\
             Please generate a COMPLETE code solution for the following request:\n\
             \n\
             Request: {message}\n\
             \n\
             STRICT instructions:\n\
             - Return the entire code in ONE markdown block like ```python ... ```\n\
             - Proper indentation is MANDATORY.\n\
             - NO emojis, NO step-by-step lists, NO headings, NO explanations.\n\
             - ONLY include code, no text outside the code block.\n\
             Additional instruction:\n\
             If anybody asks about your creator, origin or anything related to your identity, just say:\n\
             \"I was created by Bhavya, the CEO of Dark AI. I'm here to assist you with whatever you need!\"\n"
        )
    } else {
        format!(
            "You are a helpful AI assistant. Format your responses cleanly and human-like.\n\
             \n\
             Instructions:\n\
             - Use bullet points (\u{2022}) only for lists\n\
             - Add a line break after each bullet point (important)\n\
             - Put the main title of each list item first (e.g., \u{2022} Mindhunter)\n\
             - Add a newline after the title and emoji, then write the description below\n\
             - No markdown formatting like ** or * or HTML symbols\n\
             - Keep responses elegant and easy to read\n\
             \n\
             Question: {message}\n"
        )
    }
}

/// Strip bold/italic markers and per-line indentation from model output.
#[must_use]
pub fn clean_markdown(text: &str) -> String {
    let cleaned = BOLD.replace_all(text, "$1");
    let cleaned = ITALIC.replace_all(&cleaned, "$1");
    let cleaned = LEADING_WS.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

/// Incoming chat message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Force the code-assistant prompt regardless of keywords.
    #[serde(default)]
    pub code_mode: bool,
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Canned(Intent),
    Code,
    Conversation,
}

/// Outgoing chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub bot_response: String,
    #[serde(skip)]
    pub source: ReplySource,
}
