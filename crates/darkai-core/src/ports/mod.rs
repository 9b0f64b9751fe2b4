//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - Vendor ports are intent-based (`generate`, `synthesize`, `upload_image`)
//!   and report failures through their own small error enums

pub mod generation;
pub mod identity;
pub mod image_repository;
pub mod mailer;
pub mod media_store;
pub mod otp_repository;
pub mod session_repository;
pub mod speech_synthesis;
pub mod user_repository;

use std::sync::Arc;
use thiserror::Error;

// Re-export port traits for convenience
pub use generation::{GenerationError, ImageGenerationPort, TextGenerationPort};
pub use identity::{IdentityError, IdentityPort};
pub use image_repository::ImageRepository;
pub use mailer::{MailerError, MailerPort, OutgoingEmail};
pub use media_store::{MediaStoreError, MediaStorePort};
pub use otp_repository::OtpRepository;
pub use session_repository::SessionRepository;
pub use speech_synthesis::{SpeechSynthesisPort, SynthesisError};
pub use user_repository::UserRepository;

/// Container for all repository trait objects.
///
/// Lives in `darkai-core` so that `AppCore` can accept it without depending
/// on `darkai-db`.
///
/// # Example
///
/// ```ignore
/// // In darkai-db factory:
/// pub fn build_repos(pool: &SqlitePool) -> Repos { ... }
///
/// // In adapter bootstrap:
/// let repos = CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, gateways, media_root);
/// ```
#[derive(Clone)]
pub struct Repos {
    /// Generated image records.
    pub images: Arc<dyn ImageRepository>,
    /// Registered accounts.
    pub users: Arc<dyn UserRepository>,
    /// Pending email verification codes.
    pub otps: Arc<dyn OtpRepository>,
    /// Issued sessions.
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        images: Arc<dyn ImageRepository>,
        users: Arc<dyn UserRepository>,
        otps: Arc<dyn OtpRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            images,
            users,
            otps,
            sessions,
        }
    }
}

/// Container for the vendor-facing ports.
#[derive(Clone)]
pub struct Gateways {
    pub text: Arc<dyn TextGenerationPort>,
    pub images: Arc<dyn ImageGenerationPort>,
    pub speech: Arc<dyn SpeechSynthesisPort>,
    pub media: Arc<dyn MediaStorePort>,
    pub mailer: Arc<dyn MailerPort>,
    pub identity: Arc<dyn IdentityPort>,
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes,
/// CLI exit codes). Messages of the user-facing variants are shown verbatim.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Invalid input.
    #[error("{0}")]
    Validation(String),

    /// Missing or bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Credentials are fine but the action is not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// The request clashes with existing state.
    #[error("{0}")]
    Conflict(String),

    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A vendor call failed.
    #[error("{0}")]
    ExternalService(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GenerationError> for CoreError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Configuration(msg) => Self::Configuration(msg),
            other => Self::ExternalService(other.to_string()),
        }
    }
}

impl From<SynthesisError> for CoreError {
    fn from(err: SynthesisError) -> Self {
        Self::ExternalService(err.to_string())
    }
}

impl From<MailerError> for CoreError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::InvalidAddress(msg) => Self::Validation(msg),
            other => Self::ExternalService(other.to_string()),
        }
    }
}

impl From<IdentityError> for CoreError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken => Self::Unauthorized(err.to_string()),
            other => Self::ExternalService(other.to_string()),
        }
    }
}
