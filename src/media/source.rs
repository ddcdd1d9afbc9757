//! Image Source Adapter: turns a picked file into an [`ImagePayload`].
//!
//! Validation is on the *declared* content type, the same check a browser
//! file input performs; the bytes are not decoded here.

use super::detection::{declared_content_type, is_image_type};
use super::types::ImagePayload;
use crate::error::SourceError;
use std::path::Path;
use tracing::debug;

/// A file chosen by the user, before validation.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    /// Build a picked file whose declared type is derived from its name
    /// (falling back to magic bytes).
    pub fn from_bytes(name: Option<&str>, bytes: Vec<u8>) -> Self {
        let content_type = declared_content_type(&bytes, name);
        Self {
            name: name.map(String::from),
            content_type,
            bytes,
        }
    }

    pub async fn read(path: &Path) -> Result<Self, SourceError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path.file_name().and_then(|n| n.to_str());
        Ok(Self::from_bytes(name, bytes))
    }
}

/// Validate a picked file and produce the canonical payload.
pub fn payload_from_file(file: PickedFile) -> Result<ImagePayload, SourceError> {
    if !is_image_type(&file.content_type) {
        return Err(SourceError::InvalidSourceType {
            content_type: file.content_type,
        });
    }

    debug!(
        name = file.name.as_deref().unwrap_or("unnamed"),
        content_type = %file.content_type,
        size = file.bytes.len(),
        "accepted image source"
    );
    Ok(ImagePayload::new(file.bytes, file.content_type))
}

/// Read and validate an image from disk in one step.
pub async fn load_image(path: &Path) -> Result<ImagePayload, SourceError> {
    payload_from_file(PickedFile::read(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    const JPEG_MAGIC: [u8; 10] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn accepts_declared_image_types() {
        let payload =
            payload_from_file(PickedFile::from_bytes(Some("me.jpg"), JPEG_MAGIC.to_vec())).unwrap();
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert_eq!(payload.bytes(), &JPEG_MAGIC);
    }

    #[test]
    fn rejects_non_image_declared_type() {
        let err = payload_from_file(PickedFile::from_bytes(Some("cv.pdf"), b"%PDF-1.7".to_vec()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSourceType);
        assert!(err.to_string().contains("application/pdf"));
    }

    #[test]
    fn rejects_unknown_bytes_without_name() {
        let err = payload_from_file(PickedFile::from_bytes(None, vec![0, 1, 2, 3])).unwrap_err();
        assert!(matches!(err, SourceError::InvalidSourceType { .. }));
    }

    #[test]
    fn explicit_declared_type_is_respected() {
        let file = PickedFile {
            name: Some("photo".into()),
            content_type: "image/webp".into(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(payload_from_file(file).unwrap().mime_type(), "image/webp");
    }

    #[tokio::test]
    async fn load_image_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portrait.jpeg");
        std::fs::write(&path, JPEG_MAGIC).unwrap();

        let payload = load_image(&path).await.unwrap();
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert_eq!(payload.len(), JPEG_MAGIC.len());
    }

    #[tokio::test]
    async fn load_image_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_image(&dir.path().join("missing.png")).await.unwrap_err();
        assert!(matches!(err, SourceError::Read(_)));
    }
}
