use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;

/// Binary image data plus its declared content type.
///
/// Immutable once built; the bytes sit behind an `Arc` so the session can
/// hand the same payload to the client, the export adapter and observers
/// without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Arc<[u8]>,
    mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Standard base64 of the raw bytes, as sent to the remote service.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Canonical `data:<mime>;base64,<data>` representation.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Parse a `data:<mime>;base64,<data>` string.
    pub fn from_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let (header, data) = rest.split_once(',').ok_or(DataUriError::MissingData)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;
        if mime_type.is_empty() {
            return Err(DataUriError::MissingMimeType);
        }
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| DataUriError::Decode(e.to_string()))?;
        Ok(Self::new(bytes, mime_type))
    }

    /// Decode a base64 body delivered alongside a separate mime type.
    pub fn from_base64(data: &str, mime_type: &str) -> Result<Self, DataUriError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| DataUriError::Decode(e.to_string()))?;
        Ok(Self::new(bytes, mime_type))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("missing `data:` scheme")]
    MissingScheme,
    #[error("missing data section")]
    MissingData,
    #[error("only base64 data URIs are supported")]
    NotBase64,
    #[error("missing mime type")]
    MissingMimeType,
    #[error("invalid base64: {0}")]
    Decode(String),
}
