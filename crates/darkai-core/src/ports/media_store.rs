//! Media storage port.
//!
//! Implementations live in `darkai-media` (Cloudinary and local filesystem).

use async_trait::async_trait;
use thiserror::Error;

/// Errors from media uploads.
#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("{0}")]
    Network(String),

    #[error("storage provider returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Port for persisting generated media and handing back a public URL.
#[async_trait]
pub trait MediaStorePort: Send + Sync {
    /// Store `bytes` as `public_id` inside `folder`.
    ///
    /// `public_id` carries no extension when the store infers one from the
    /// content. Returns the URL clients should load the media from.
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        public_id: &str,
        folder: &str,
    ) -> Result<String, MediaStoreError>;

    /// Short label for logs (`cloudinary`, `local`).
    fn backend_name(&self) -> &'static str;
}
