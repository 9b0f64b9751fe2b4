#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod cloudinary;
mod config;
mod local;

use std::path::PathBuf;
use std::sync::Arc;

use darkai_core::{MediaStoreError, MediaStorePort};

pub use cloudinary::{CloudinaryMediaStore, sign_params};
pub use config::{CloudinaryConfig, DEFAULT_CLOUDINARY_API};
pub use local::{LocalMediaStore, MEDIA_URL_PREFIX};

/// Cloudinary when configured, otherwise the local filesystem under `media_root`.
pub fn select_media_store(
    cloudinary: Option<CloudinaryConfig>,
    media_root: PathBuf,
) -> Result<Arc<dyn MediaStorePort>, MediaStoreError> {
    let store: Arc<dyn MediaStorePort> = match cloudinary {
        Some(config) => {
            tracing::info!(target: "darkai.media", cloud = %config.cloud_name, "using Cloudinary media store");
            Arc::new(CloudinaryMediaStore::new(config)?)
        }
        None => {
            tracing::info!(target: "darkai.media", root = %media_root.display(), "using local media store");
            Arc::new(LocalMediaStore::new(media_root))
        }
    };
    Ok(store)
}
