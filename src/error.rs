use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Flat classification ─────────────────────────────────────────────────────

/// Flat error classification shared by every subsystem.
///
/// The surface decides how prominently to render a failure from its kind:
/// source and export kinds are transient inline messages, transformation
/// kinds move the session into `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidSourceType,
    DeviceUnavailable,
    SafetyBlocked,
    TransformationFailed,
    ShareUnsupported,
    ShareFailed,
}

impl ErrorKind {
    /// Whether the failure is local to its action and never changes session state.
    #[must_use]
    pub fn is_transient(self) -> bool {
        !matches!(self, Self::SafetyBlocked | Self::TransformationFailed)
    }
}

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `agemorph`.
///
/// Library callers can match on the subsystem variant; binary glue code
/// keeps using `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum AgemorphError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Image source ────────────────────────────────────────────────────
    #[error("source: {0}")]
    Source(#[from] SourceError),

    // ── Remote transformation ───────────────────────────────────────────
    #[error("transform: {0}")]
    Transform(#[from] TransformError),

    // ── Export / share ──────────────────────────────────────────────────
    #[error("export: {0}")]
    Export(#[from] ExportError),

    // ── Dictation ───────────────────────────────────────────────────────
    #[error("dictation: {0}")]
    Dictation(#[from] DictationError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AgemorphError {
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Source(err) => Some(err.kind()),
            Self::Transform(err) => Some(err.kind),
            Self::Export(err) => err.kind(),
            Self::Config(_) | Self::Dictation(_) | Self::Other(_) => None,
        }
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Image source errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("not an image: declared content type is {content_type}")]
    InvalidSourceType { content_type: String },

    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("failed to read image source: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to encode captured frame: {0}")]
    Encode(String),
}

impl SourceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSourceType { .. } | Self::Read(_) => ErrorKind::InvalidSourceType,
            Self::DeviceUnavailable(_) | Self::Encode(_) => ErrorKind::DeviceUnavailable,
        }
    }
}

// ─── Transformation errors ──────────────────────────────────────────────────

pub const SAFETY_BLOCKED_MESSAGE: &str =
    "Image generation was blocked due to safety settings. Please try a different image.";

pub const TRANSFORMATION_FAILED_MESSAGE: &str =
    "Failed to transform image. Please check the logs for details.";

/// Failure variant of a transformation attempt: a kind plus the message shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    pub kind: ErrorKind,
    pub message: String,
}

impl TransformError {
    #[must_use]
    pub fn safety_blocked() -> Self {
        Self {
            kind: ErrorKind::SafetyBlocked,
            message: SAFETY_BLOCKED_MESSAGE.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TransformationFailed,
            message: message.into(),
        }
    }

    /// Generic transport/parsing failure with the fixed user message.
    #[must_use]
    pub fn transport() -> Self {
        Self::failed(TRANSFORMATION_FAILED_MESSAGE)
    }

    #[must_use]
    pub fn is_safety_blocked(&self) -> bool {
        self.kind == ErrorKind::SafetyBlocked
    }
}

// ─── Export / share errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to decode result image: {0}")]
    Decode(String),

    #[error("failed to encode {format}: {message}")]
    Encode { format: String, message: String },

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("sharing is not supported on this surface")]
    ShareUnsupported,

    #[error("sharing failed: {0}")]
    ShareFailed(String),
}

impl ExportError {
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::ShareUnsupported => Some(ErrorKind::ShareUnsupported),
            Self::ShareFailed(_) => Some(ErrorKind::ShareFailed),
            Self::Decode(_) | Self::Encode { .. } | Self::Io(_) => None,
        }
    }
}

// ─── Dictation errors ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictationError {
    #[error("speech recognition is not supported")]
    Unsupported,

    #[error("speech recognizer failed to start: {0}")]
    Start(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, AgemorphError>;
