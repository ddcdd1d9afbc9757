//! Transformation Request Builder.
//!
//! The clause order and wording are part of the contract with the remote
//! model: age, optional attire, background placement or preservation, then
//! the style clause.

use super::params::TransformationParameters;
use crate::media::ImagePayload;

const STYLE_CLAUSE: &str = " Maintain a realistic photographic style.";
const PRESERVE_BACKGROUND_CLAUSE: &str = " Preserve the original background as much as possible.";

/// Payload plus the composed instruction. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationRequest {
    pub payload: ImagePayload,
    pub instruction: String,
}

#[must_use]
pub fn build_instruction(params: &TransformationParameters) -> String {
    let mut instruction = format!(
        "Make the person in this photo look like they are {} years old.",
        params.target_age()
    );

    if params.has_profession() {
        instruction.push_str(&format!(
            " Dress them in the attire of a {}.",
            params.profession
        ));
    }

    if params.has_background() {
        instruction.push_str(&format!(
            " Place them in a background of: {}.",
            params.background
        ));
    } else {
        instruction.push_str(PRESERVE_BACKGROUND_CLAUSE);
    }

    instruction.push_str(STYLE_CLAUSE);
    instruction
}

#[must_use]
pub fn build_request(
    payload: ImagePayload,
    params: &TransformationParameters,
) -> TransformationRequest {
    TransformationRequest {
        instruction: build_instruction(params),
        payload,
    }
}
