//! Social identity port (Google sign-in).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SocialIdentity;

/// Errors from identity lookups.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider rejected the access token.
    #[error("Invalid Google access token.")]
    InvalidToken,

    #[error("Identity request failed: {0}")]
    Network(String),

    #[error("Invalid identity response: {0}")]
    InvalidResponse(String),
}

/// Port for resolving an OAuth access token to the user behind it.
#[async_trait]
pub trait IdentityPort: Send + Sync {
    async fn fetch_google_identity(
        &self,
        access_token: &str,
    ) -> Result<SocialIdentity, IdentityError>;
}
