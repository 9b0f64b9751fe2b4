#![doc = include_str!("../README.md")]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    AuthAction, AuthOutcome, ChatReply, ChatRequest, GeneratedImage, InlineImage, Intent,
    NewGeneratedImage, NewUser, OtpRecord, ReplySource, Session, SocialIdentity, SpeechClip,
    SpeechRequest, User, UserProfile,
};
pub use ports::{
    CoreError, Gateways, GenerationError, IdentityError, IdentityPort, ImageGenerationPort,
    ImageRepository, MailerError, MailerPort, MediaStoreError, MediaStorePort, OtpRepository,
    OutgoingEmail, Repos, RepositoryError, SessionRepository, SpeechSynthesisPort,
    SynthesisError, TextGenerationPort, UserRepository,
};
pub use services::{AppCore, AuthService, ChatService, ImageService, SpeechService};

// Re-export path utilities
pub use paths::{
    PathError, ResolvedPaths, data_root, database_path, ensure_directory, media_root,
    verify_writable,
};
