// src/services/media_service.rs
//
// Media Service - image uploads for products, posts and story rings
//
// RULES:
// - Files are checked BEFORE anything is sent to the backend
// - Object names are derived from upload time and content hash, never from
//   the user's file name
// - Existing objects are never overwritten

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FileUploaded, Operation, OperationFailed};
use crate::persistence::{FileUpload, PersistenceLayer};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const DEFAULT_BUCKET: &str = "media";

/// Accepted content types and the extension stored objects get.
pub const ALLOWED_IMAGE_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

/// Content type for a local file extension, case-insensitive.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// An image chosen by the administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl MediaFile {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Read a local file, guessing the content type from its extension.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let content_type = content_type_for_extension(extension).ok_or_else(|| {
            AppError::Validation(format!("Unsupported image file '{}'", path.display()))
        })?;

        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(bytes, content_type))
    }
}

/// `{folder}/{yyyymmddHHMMSS}-{sha256 prefix}.{ext}`
pub fn object_path(folder: &str, bytes: &[u8], extension: &str, now: DateTime<Utc>) -> String {
    let digest = Sha256::digest(bytes);
    let hash: String = digest.iter().take(6).map(|b| format!("{:02x}", b)).collect();

    format!(
        "{}/{}-{}.{}",
        folder.trim_matches('/'),
        now.format("%Y%m%d%H%M%S"),
        hash,
        extension
    )
}

pub struct MediaService {
    backend: Arc<dyn PersistenceLayer>,
    event_bus: Arc<EventBus>,
    bucket: String,
    max_bytes: usize,
}

impl MediaService {
    pub fn new(
        backend: Arc<dyn PersistenceLayer>,
        event_bus: Arc<EventBus>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            event_bus,
            bucket: bucket.into(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Check size and type; returns the extension the object will get.
    pub fn validate(&self, file: &MediaFile) -> AppResult<&'static str> {
        if file.bytes.is_empty() {
            return Err(AppError::Validation("File is empty".to_string()));
        }

        if file.bytes.len() > self.max_bytes {
            return Err(AppError::Validation(format!(
                "File is {} bytes; the limit is {} bytes",
                file.bytes.len(),
                self.max_bytes
            )));
        }

        ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(content_type, _)| *content_type == file.content_type)
            .map(|(_, extension)| *extension)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unsupported content type '{}'",
                    file.content_type
                ))
            })
    }

    /// Validate and store the file under `folder`, returning its public URL.
    pub async fn upload(&self, folder: &str, file: MediaFile) -> AppResult<String> {
        match self.try_upload(folder, file).await {
            Ok(uploaded) => {
                log::info!("Uploaded {}/{}", uploaded.bucket, uploaded.path);
                let url = uploaded.public_url.clone();
                self.event_bus.emit(uploaded);
                Ok(url)
            }
            Err(e) => {
                log::error!("upload to {} failed: {}", self.bucket, e);
                self.event_bus.emit(OperationFailed::new(
                    None,
                    Operation::Upload,
                    e.kind(),
                    e.to_string(),
                ));
                Err(e)
            }
        }
    }

    async fn try_upload(&self, folder: &str, file: MediaFile) -> AppResult<FileUploaded> {
        let extension = self.validate(&file)?;
        let path = object_path(folder, &file.bytes, extension, Utc::now());

        let upload = FileUpload {
            bucket: self.bucket.clone(),
            path: path.clone(),
            bytes: file.bytes,
            content_type: file.content_type,
        };
        upload.validate_path()?;

        let public_url = self.backend.upload_file(upload).await?;
        Ok(FileUploaded::new(self.bucket.clone(), path, public_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MockPersistenceLayer;
    use chrono::TimeZone;

    fn service(mock: MockPersistenceLayer) -> MediaService {
        MediaService::new(Arc::new(mock), Arc::new(EventBus::new()), "media")
    }

    #[test]
    fn test_object_path_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = object_path("/products/", b"abc", "png", now);

        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(path, "products/20240309140507-ba7816bf8f01.png");
    }

    #[test]
    fn test_validation_rules() {
        let media = service(MockPersistenceLayer::new()).with_max_bytes(4);

        assert_eq!(media.validate(&MediaFile::new(vec![1, 2], "image/webp")).unwrap(), "webp");
        assert!(media.validate(&MediaFile::new(vec![], "image/png")).is_err());
        assert!(media.validate(&MediaFile::new(vec![0; 5], "image/png")).is_err());
        assert!(media.validate(&MediaFile::new(vec![1], "image/svg+xml")).is_err());
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for_extension("JPEG"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("gif"), Some("image/gif"));
        assert_eq!(content_type_for_extension("bmp"), None);
    }

    #[tokio::test]
    async fn test_invalid_file_never_reaches_backend() {
        let mut mock = MockPersistenceLayer::new();
        mock.expect_upload_file().times(0);

        let media = service(mock);
        let err = media
            .upload("products", MediaFile::new(vec![1], "text/plain"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_upload_emits_file_uploaded() {
        let mut mock = MockPersistenceLayer::new();
        mock.expect_upload_file()
            .withf(|upload| {
                upload.bucket == "media"
                    && upload.path.starts_with("products/")
                    && upload.path.ends_with(".png")
                    && upload.content_type == "image/png"
            })
            .times(1)
            .returning(|upload| Ok(format!("https://cdn.example.com/{}", upload.path)));

        let bus = Arc::new(EventBus::new());
        let media = MediaService::new(Arc::new(mock), bus.clone(), "media");

        let url = media
            .upload("products", MediaFile::new(vec![7; 16], "image/png"))
            .await
            .unwrap();

        assert!(url.starts_with("https://cdn.example.com/products/"));
        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "FileUploaded");
    }
}
