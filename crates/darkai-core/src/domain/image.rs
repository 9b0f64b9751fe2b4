//! Generated image domain types and payload checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Folder (or sub-directory) generated images are stored under.
pub const IMAGE_FOLDER: &str = "generated_images";

/// Payloads smaller than this are treated as broken model output.
pub const MIN_IMAGE_BYTES: usize = 1024;

/// Default page size for image listings.
pub const DEFAULT_IMAGE_PAGE: u32 = 20;

/// Upper bound for image listings.
pub const MAX_IMAGE_PAGE: u32 = 100;

/// A persisted generated image.
///
/// `file_name` carries the public URL of the stored media; the field name is
/// what the chat frontend reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: i64,
    pub prompt: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

/// Data for recording a new generated image.
#[derive(Debug, Clone)]
pub struct NewGeneratedImage {
    pub prompt: String,
    pub file_name: String,
}

/// Decoded inline image returned by the image model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Recognised image container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Sniff the container format from magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    /// File extension, with the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Gif => ".gif",
            Self::Webp => ".webp",
        }
    }
}

/// Why an image payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImagePayloadError {
    #[error("Image is too small to be valid")]
    TooSmall(usize),

    #[error("Invalid image file from the image model")]
    UnknownFormat,
}

/// Check that a decoded payload is a plausible image.
pub fn validate_image(bytes: &[u8]) -> Result<ImageFormat, ImagePayloadError> {
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(ImagePayloadError::TooSmall(bytes.len()));
    }
    ImageFormat::sniff(bytes).ok_or(ImagePayloadError::UnknownFormat)
}

/// File extension (with dot) for a MIME type, defaulting to `.png`.
#[must_use]
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".png",
    }
}

/// Storage name for a generated image.
#[must_use]
pub fn image_file_name(unix_secs: i64, index: u32, extension: &str) -> String {
    format!("generated_image_{unix_secs}_{index}{extension}")
}

/// Clamp a requested page size into `1..=MAX_IMAGE_PAGE`.
#[must_use]
pub fn clamp_page_size(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_IMAGE_PAGE).clamp(1, MAX_IMAGE_PAGE)
}
