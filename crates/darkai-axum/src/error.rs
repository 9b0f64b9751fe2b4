//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` to HTTP status codes and the JSON error body the
//! frontend reads.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use darkai_core::{CoreError, RepositoryError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An upstream vendor (model, TTS, storage, mail) failed.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl HttpError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_message(self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::BadGateway(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "darkai.http", status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(target: "darkai.http", status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: self.into_message(),
            status: status.as_u16(),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Unauthorized(msg) => Self::Unauthorized(msg),
            CoreError::Forbidden(msg) => Self::Forbidden(msg),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::ExternalService(msg) => Self::BadGateway(msg),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
        }
    }
}
