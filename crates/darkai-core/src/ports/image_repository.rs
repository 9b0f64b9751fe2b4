//! Generated image repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{GeneratedImage, NewGeneratedImage};

/// Repository for generated image records.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Page-size clamping belongs in `ImageService`, not here
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert a new record, returning it with its assigned ID and timestamp.
    async fn insert(&self, image: &NewGeneratedImage) -> Result<GeneratedImage, RepositoryError>;

    /// Get a record by its database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<GeneratedImage, RepositoryError>;

    /// Most recent records first, at most `limit` of them.
    async fn list_recent(&self, limit: u32) -> Result<Vec<GeneratedImage>, RepositoryError>;
}
