use serde::{Deserialize, Serialize};

// ── Request ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub(super) contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub(super) generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(super) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) role: Option<String>,
    pub(super) parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(super) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub(super) inline_data: Option<InlineData>,
}

impl Part {
    pub(super) fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    pub(super) fn inline_data(mime_type: String, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type, data }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type", default)]
    pub(super) mime_type: String,
    pub(super) data: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub(super) response_modalities: Vec<&'static str>,
}

// ── Response (wire shape) ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub(super) candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    pub(super) prompt_feedback: Option<PromptFeedback>,
    pub(super) error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Candidate {
    pub(super) content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub(super) parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsePart {
    pub(super) text: Option<String>,
    #[serde(rename = "inlineData", alias = "inline_data")]
    pub(super) inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub(super) block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    #[serde(default)]
    pub(super) message: String,
}

// ── Decoded reply ────────────────────────────────────────────────────────────

/// One content part of the first candidate, decoded once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    InlineImage { mime_type: String, data: String },
    Text(String),
    Other,
}

impl From<ResponsePart> for ContentPart {
    fn from(part: ResponsePart) -> Self {
        match (part.inline_data, part.text) {
            (Some(inline), _) => Self::InlineImage {
                mime_type: inline.mime_type,
                data: inline.data,
            },
            (None, Some(text)) => Self::Text(text),
            (None, None) => Self::Other,
        }
    }
}

/// What the model sent back, independent of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub parts: Vec<ContentPart>,
    pub finish_reason: Option<String>,
    pub block_reason: Option<String>,
}

impl From<GenerateContentResponse> for ModelReply {
    fn from(response: GenerateContentResponse) -> Self {
        let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = response.candidates.into_iter().next() else {
            return Self {
                block_reason,
                ..Self::default()
            };
        };

        Self {
            parts: candidate
                .content
                .map(|c| c.parts.into_iter().map(ContentPart::from).collect())
                .unwrap_or_default(),
            finish_reason: candidate.finish_reason,
            block_reason,
        }
    }
}
