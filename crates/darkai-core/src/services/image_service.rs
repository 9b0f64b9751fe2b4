//! Image service - generate, validate, upload and record images.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::image::{
    IMAGE_FOLDER, clamp_page_size, extension_for_mime, image_file_name, validate_image,
};
use crate::domain::{GeneratedImage, NewGeneratedImage};
use crate::ports::{
    CoreError, ImageGenerationPort, ImageRepository, MediaStorePort, RepositoryError,
};

/// Service for generated images.
pub struct ImageService {
    generator: Arc<dyn ImageGenerationPort>,
    media: Arc<dyn MediaStorePort>,
    repo: Arc<dyn ImageRepository>,
}

impl ImageService {
    pub fn new(
        generator: Arc<dyn ImageGenerationPort>,
        media: Arc<dyn MediaStorePort>,
        repo: Arc<dyn ImageRepository>,
    ) -> Self {
        Self {
            generator,
            media,
            repo,
        }
    }

    /// Generate an image for `prompt`, store it and record it.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, CoreError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CoreError::Validation("Prompt is required.".to_string()));
        }

        let image = self
            .generator
            .generate_image(prompt)
            .await?
            .ok_or_else(|| CoreError::Validation("Image generation failed.".to_string()))?;

        let format = validate_image(&image.data).map_err(|e| {
            tracing::warn!(
                target: "darkai.image",
                bytes = image.data.len(),
                mime = %image.mime_type,
                "rejected image payload: {e}"
            );
            CoreError::Validation(e.to_string())
        })?;
        tracing::debug!(target: "darkai.image", ?format, bytes = image.data.len(), "image payload accepted");

        let file_name = image_file_name(
            Utc::now().timestamp(),
            0,
            extension_for_mime(&image.mime_type),
        );
        let public_id = file_name
            .rsplit_once('.')
            .map_or(file_name.as_str(), |(stem, _)| stem);

        let url = self
            .media
            .upload_image(image.data, public_id, IMAGE_FOLDER)
            .await
            .map_err(|e| CoreError::ExternalService(format!("Media upload failed: {e}")))?;

        tracing::info!(
            target: "darkai.image",
            backend = self.media.backend_name(),
            %url,
            "stored generated image"
        );

        let record = self
            .repo
            .insert(&NewGeneratedImage {
                prompt: prompt.to_string(),
                file_name: url,
            })
            .await?;
        Ok(record)
    }

    /// Most recent images first.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<GeneratedImage>, CoreError> {
        Ok(self.repo.list_recent(clamp_page_size(limit)).await?)
    }

    /// A single image record.
    pub async fn get(&self, id: i64) -> Result<GeneratedImage, CoreError> {
        match self.repo.get_by_id(id).await {
            Ok(image) => Ok(image),
            Err(RepositoryError::NotFound(_)) => {
                Err(CoreError::NotFound(format!("Image {id} not found.")))
            }
            Err(e) => Err(CoreError::from(e)),
        }
    }
}
