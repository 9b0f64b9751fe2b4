//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to sysexits-style exit codes.

use darkai_core::{CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A vendor (Gemini, TTS, storage, mail) failed.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// - 1: General error
    /// - 2: Invalid arguments
    /// - 64-78: see sysexits.h
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Database(_) => 73,    // EX_CANTCREAT
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }

    /// Exit code for any error reaching `main`; errors outside `CliError` are general.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<Self>().map_or(1, Self::exit_code)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Configuration(msg) => Self::Config(msg),
            CoreError::ExternalService(msg) => Self::Unavailable(msg),
            CoreError::Unauthorized(msg)
            | CoreError::Forbidden(msg)
            | CoreError::Conflict(msg)
            | CoreError::NotFound(msg)
            | CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
