//! Filesystem media store used when no Cloudinary account is configured.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use darkai_core::domain::ImageFormat;
use darkai_core::{MediaStoreError, MediaStorePort};

/// URL prefix the HTTP layer serves `media_root` under.
pub const MEDIA_URL_PREFIX: &str = "/media";

/// Writes images below a media root and returns `/media/...` URLs.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A single path segment: no separators, no parent references.
fn check_segment(kind: &str, value: &str) -> Result<(), MediaStoreError> {
    let bad = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);
    if bad {
        return Err(MediaStoreError::Io(format!("invalid {kind}: {value:?}")));
    }
    Ok(())
}

#[async_trait]
impl MediaStorePort for LocalMediaStore {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        public_id: &str,
        folder: &str,
    ) -> Result<String, MediaStoreError> {
        check_segment("folder", folder)?;
        check_segment("public id", public_id)?;

        let extension = ImageFormat::sniff(&bytes).map_or(".png", ImageFormat::extension);
        let file_name = format!("{public_id}{extension}");
        let dir = self.root.join(folder);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| MediaStoreError::Io(format!("{}: {e}", dir.display())))?;
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| MediaStoreError::Io(format!("{}: {e}", path.display())))?;

        tracing::debug!(target: "darkai.media", path = %path.display(), bytes = bytes.len(), "stored media locally");
        Ok(format!("{MEDIA_URL_PREFIX}/{folder}/{file_name}"))
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkai_core::testing::fake_png;

    #[tokio::test]
    async fn writes_file_and_returns_media_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let url = store
            .upload_image(fake_png(2048), "generated_image_1_0", "generated_images")
            .await
            .unwrap();

        assert_eq!(url, "/media/generated_images/generated_image_1_0.png");
        let written = dir.path().join("generated_images/generated_image_1_0.png");
        assert_eq!(std::fs::read(written).unwrap().len(), 2048);
    }

    #[tokio::test]
    async fn extension_follows_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0];
        jpeg.resize(1500, 0);

        let url = store.upload_image(jpeg, "photo", "generated_images").await.unwrap();
        assert!(url.ends_with("/photo.jpg"));
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        for (id, folder) in [("../escape", "generated_images"), ("x", ".."), ("", "f")] {
            let err = store.upload_image(vec![1], id, folder).await.unwrap_err();
            assert!(matches!(err, MediaStoreError::Io(_)), "{id} / {folder}");
        }
    }
}
