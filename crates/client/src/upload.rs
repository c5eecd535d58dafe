//! Upload adapter for item photos.
//!
//! Deliberately thin: the object key pattern `upload-{userId}.{ext}` is
//! agreed with the backend out of band, so "obtaining a destination" is a
//! deterministic rename followed by a PUT to the bucket. The same bucket
//! serves the generation's display image back out via [`StorageClient::image_url`].

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use resell_core::UserId;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Extensions the backend accepts, per the upload form's
/// "1x JPG/PNG Image" constraint.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Derive the deterministic object key for a user's upload.
///
/// # Errors
///
/// Returns [`ClientError::InvalidImage`] if the path has no extension or an
/// extension outside JPG/PNG.
pub fn object_key(user_id: &UserId, image_path: &Path) -> Result<String, ClientError> {
    let extension = image_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| {
            ClientError::InvalidImage(format!(
                "{} has no file extension",
                image_path.display()
            ))
        })?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ClientError::InvalidImage(format!(
            "unsupported extension .{extension}, expected one of: jpg, jpeg, png"
        )));
    }

    Ok(format!("upload-{user_id}.{extension}"))
}

/// Content type for an object key derived by [`object_key`].
#[must_use]
pub fn content_type(key: &str) -> &'static str {
    if key.ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// Client for the photo bucket.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl StorageClient {
    /// Create a new storage client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorageClientInner {
                http,
                base_url: config.storage_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Transfer photo bytes to the bucket under the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the bucket rejects the PUT.
    #[instrument(skip(self, bytes), fields(key = %key, bytes = bytes.len()))]
    pub async fn put_image(&self, key: &str, bytes: Vec<u8>) -> Result<(), ClientError> {
        let url = format!("{}/{key}", self.inner.base_url);

        let response = self
            .inner
            .http
            .put(&url)
            .header("Content-Type", content_type(key))
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "image upload rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("image uploaded");
        Ok(())
    }

    /// Public URL of a generation's display image.
    #[must_use]
    pub fn image_url(&self, pic_url: &str) -> String {
        format!("{}/{pic_url}", self.inner.base_url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_pattern() {
        let key = object_key(&UserId::new("u-42"), Path::new("photo.JPG")).unwrap();
        assert_eq!(key, "upload-u-42.jpg");

        let key = object_key(&UserId::new("u-42"), Path::new("/tmp/shirt.png")).unwrap();
        assert_eq!(key, "upload-u-42.png");
    }

    #[test]
    fn test_object_key_rejects_non_images() {
        let err = object_key(&UserId::new("u-42"), Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidImage(_)));

        let err = object_key(&UserId::new("u-42"), Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidImage(_)));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("upload-u.png"), "image/png");
        assert_eq!(content_type("upload-u.jpg"), "image/jpeg");
        assert_eq!(content_type("upload-u.jpeg"), "image/jpeg");
    }
}
