//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, vendor APIs, filesystem).
//!
//! # Structure
//!
//! - `chat` - Canned persona replies, code-intent detection, prompts, cleanup
//! - `image` - Generated image records and payload validation
//! - `speech` - Text-to-speech languages and text chunking
//! - `auth` - Accounts, one-time passwords and sessions

pub mod auth;
pub mod chat;
pub mod image;
pub mod speech;

// Re-export chat types at the domain level for convenience
pub use chat::{ChatReply, ChatRequest, Intent, ReplySource};

// Re-export image types at the domain level for convenience
pub use image::{GeneratedImage, ImageFormat, ImagePayloadError, InlineImage, NewGeneratedImage};

// Re-export speech types at the domain level for convenience
pub use speech::{SpeechClip, SpeechRequest};

// Re-export auth types at the domain level for convenience
pub use auth::{
    AuthAction, AuthOutcome, NewUser, OtpRecord, Session, SocialIdentity, User, UserProfile,
};
