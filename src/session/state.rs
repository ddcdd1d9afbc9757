use crate::error::TransformError;
use crate::media::ImagePayload;

/// Stage of the upload -> generate -> result interaction.
///
/// Each variant carries exactly the data valid in that stage, so a result can
/// never be observed next to an error, and nothing but `Empty` lacks a source.
#[derive(Debug, Clone, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    #[default]
    Empty,
    SourceSelected {
        source: ImagePayload,
    },
    InFlight {
        source: ImagePayload,
    },
    Completed {
        source: ImagePayload,
        result: ImagePayload,
    },
    Failed {
        source: ImagePayload,
        error: TransformError,
    },
}

impl SessionState {
    #[must_use]
    pub fn source(&self) -> Option<&ImagePayload> {
        match self {
            Self::Empty => None,
            Self::SourceSelected { source }
            | Self::InFlight { source }
            | Self::Completed { source, .. }
            | Self::Failed { source, .. } => Some(source),
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&ImagePayload> {
        match self {
            Self::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&TransformError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }
}
