//! Google Gemini image transformation client.
//!
//! Sends the source image as an inline-data part followed by the instruction
//! text, asks for IMAGE and TEXT modalities, and reduces the reply to either
//! a result image or a classified [`TransformError`].

use crate::config::Config;
use crate::error::TransformError;
use crate::llm::{
    build_transform_client, sanitize_api_error,
    traits::{TransformFuture, Transformer},
};
use crate::media::ImagePayload;
use crate::prompt::TransformationRequest;
use reqwest::Client;
use tracing::{debug, info, warn};

mod types;
pub use types::{ContentPart, ModelReply};
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upstream marker for content-policy rejections (also matches `IMAGE_SAFETY`).
const SAFETY_MARKER: &str = "SAFETY";

const NO_IMAGE_MESSAGE: &str = "No image data found in the API response.";

pub struct GeminiTransformer {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiTransformer {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self::with_client(api_key, model, build_transform_client(None))
    }

    fn with_client(api_key: Option<&str>, model: &str, client: Client) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()).map(String::from),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_client(
            config.api_key.as_deref(),
            &config.model,
            build_transform_client(config.request_timeout_secs),
        )
        .with_base_url(&config.api_base_url)
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url,
            Self::model_name(&self.model)
        )
    }

    fn build_request(request: &TransformationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::inline_data(
                        request.payload.mime_type().to_string(),
                        request.payload.to_base64(),
                    ),
                    Part::text(request.instruction.clone()),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        }
    }

    async fn call_api(
        &self,
        request: &TransformationRequest,
    ) -> Result<GenerateContentResponse, TransformError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Gemini API key not configured; set GEMINI_API_KEY or api_key in config");
            return Err(TransformError::transport());
        };

        debug!(
            model = %self.model,
            image_bytes = request.payload.len(),
            mime_type = request.payload.mime_type(),
            "sending transformation request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini request failed: {}", describe_transport_error(e));
                TransformError::transport()
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let sanitized = sanitize_api_error(&body);
            warn!("Gemini API error ({status}): {sanitized}");
            return Err(classify_upstream_error(&body));
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            warn!(
                "Gemini response could not be parsed: {}",
                describe_transport_error(e)
            );
            TransformError::transport()
        })?;

        if let Some(err) = result.error.as_ref() {
            warn!("Gemini API error: {}", sanitize_api_error(&err.message));
            return Err(classify_upstream_error(&err.message));
        }

        Ok(result)
    }
}

/// Loggable form of a reqwest error. The request URL carries the API key in
/// its query string, so it is stripped before the message is scrubbed.
fn describe_transport_error(err: reqwest::Error) -> String {
    sanitize_api_error(&err.without_url().to_string())
}

fn classify_upstream_error(message: &str) -> TransformError {
    if message.contains(SAFETY_MARKER) {
        TransformError::safety_blocked()
    } else {
        TransformError::transport()
    }
}

/// Reduce a decoded reply to a result image or a classified failure.
///
/// Binary parts are searched before text parts: a reply carrying both is a
/// success.
pub fn interpret_reply(reply: &ModelReply) -> Result<ImagePayload, TransformError> {
    let image = reply.parts.iter().find_map(|part| match part {
        ContentPart::InlineImage { mime_type, data } => Some((mime_type, data)),
        ContentPart::Text(_) | ContentPart::Other => None,
    });

    if let Some((mime_type, data)) = image {
        let mime_type = if mime_type.is_empty() {
            "image/png"
        } else {
            mime_type.as_str()
        };
        return ImagePayload::from_base64(data, mime_type).map_err(|e| {
            warn!("Gemini returned undecodable image data: {e}");
            TransformError::transport()
        });
    }

    let text = reply.parts.iter().find_map(|part| match part {
        ContentPart::Text(text) => Some(text),
        ContentPart::InlineImage { .. } | ContentPart::Other => None,
    });

    if let Some(text) = text {
        if text.contains(SAFETY_MARKER) {
            return Err(TransformError::safety_blocked());
        }
        return Err(TransformError::failed(format!(
            "API returned text instead of an image: {text}"
        )));
    }

    let blocked = [reply.block_reason.as_deref(), reply.finish_reason.as_deref()]
        .into_iter()
        .flatten()
        .any(|reason| reason.contains(SAFETY_MARKER));
    if blocked {
        return Err(TransformError::safety_blocked());
    }

    Err(TransformError::failed(NO_IMAGE_MESSAGE))
}

impl Transformer for GeminiTransformer {
    fn name(&self) -> &str {
        "gemini"
    }

    fn transform<'a>(&'a self, request: &'a TransformationRequest) -> TransformFuture<'a> {
        Box::pin(async move {
            let response = self.call_api(request).await?;
            let reply = ModelReply::from(response);
            debug!(parts = reply.parts.len(), "received transformation reply");

            let outcome = interpret_reply(&reply);
            match &outcome {
                Ok(image) => info!(
                    mime_type = image.mime_type(),
                    bytes = image.len(),
                    "transformation succeeded"
                ),
                Err(err) => warn!(kind = %err.kind, "transformation rejected: {err}"),
            }
            outcome
        })
    }
}
