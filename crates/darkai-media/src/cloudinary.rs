//! Signed uploads to Cloudinary.

use async_trait::async_trait;
use darkai_core::{MediaStoreError, MediaStorePort};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::CloudinaryConfig;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Sign upload parameters the way Cloudinary expects.
///
/// Parameters are sorted by key and joined as `k=v&k=v`, then the secret is
/// appended and the whole string hashed with SHA-256.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by_key(|(k, _)| *k);
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{:x}", Sha256::digest(format!("{joined}{api_secret}").as_bytes()))
}

/// Media store uploading to a Cloudinary account.
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaStoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MediaStoreError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn upload_form(&self, bytes: Vec<u8>, public_id: &str, folder: &str, timestamp: &str) -> Form {
        let signature = sign_params(
            &[
                ("folder", folder),
                ("public_id", public_id),
                ("timestamp", timestamp),
            ],
            &self.config.api_secret,
        );

        Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder.to_string())
            .text("public_id", public_id.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", Part::bytes(bytes).file_name(public_id.to_string()))
    }
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

#[async_trait]
impl MediaStorePort for CloudinaryMediaStore {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        public_id: &str,
        folder: &str,
    ) -> Result<String, MediaStoreError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let size = bytes.len();
        let form = self.upload_form(bytes, public_id, folder, &timestamp);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaStoreError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MediaStoreError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(MediaStoreError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| MediaStoreError::InvalidResponse(e.to_string()))?;
        let url = parsed.secure_url.or(parsed.url).ok_or_else(|| {
            MediaStoreError::InvalidResponse("upload response has no url".to_string())
        })?;

        tracing::debug!(target: "darkai.media", public_id, folder, bytes = size, "cloudinary upload complete");
        Ok(url)
    }

    fn backend_name(&self) -> &'static str {
        "cloudinary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_sorted_and_salted() {
        let a = sign_params(&[("timestamp", "1"), ("folder", "f")], "secret");
        let b = sign_params(&[("folder", "f"), ("timestamp", "1")], "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let expected = format!("{:x}", Sha256::digest(b"folder=f&timestamp=1secret"));
        assert_eq!(a, expected);
        assert_ne!(a, sign_params(&[("folder", "f"), ("timestamp", "1")], "other"));
    }

    #[test]
    fn empty_params_are_not_signed() {
        assert_eq!(
            sign_params(&[("folder", ""), ("timestamp", "1")], "s"),
            sign_params(&[("timestamp", "1")], "s")
        );
    }

    #[test]
    fn rejection_message_prefers_api_error() {
        assert_eq!(
            rejection_message(r#"{"error":{"message":"Invalid Signature"}}"#),
            "Invalid Signature"
        );
        assert_eq!(rejection_message("oops"), "oops");
    }
}
