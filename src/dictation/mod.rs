//! Voice input for the free-text parameter fields.
//!
//! One recognizer serves both fields. The arbiter owns it and tracks which
//! field, if any, is listening; starting one field stops the other.

use crate::error::DictationError;
use crate::prompt::TransformationParameters;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DictationField {
    Profession,
    Background,
}

impl DictationField {
    /// Write a transcript into the matching parameter.
    pub fn apply(self, params: &mut TransformationParameters, transcript: &str) {
        match self {
            Self::Profession => params.profession = transcript.to_string(),
            Self::Background => params.background = transcript.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictationState {
    #[default]
    Idle,
    ListeningFor(DictationField),
}

/// Platform speech-to-text engine: single utterance, final results only.
pub trait SpeechRecognizer: Send {
    fn start(&mut self) -> Result<(), DictationError>;
    fn stop(&mut self);
}

pub struct DictationArbiter {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    state: DictationState,
}

impl DictationArbiter {
    pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>) -> Self {
        Self {
            recognizer,
            state: DictationState::Idle,
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    #[must_use]
    pub fn state(&self) -> DictationState {
        self.state
    }

    /// Voice button for `field`: stops it if it is listening, otherwise
    /// stops whatever else is listening and starts `field`.
    pub fn toggle(&mut self, field: DictationField) -> Result<DictationState, DictationError> {
        let recognizer = self
            .recognizer
            .as_mut()
            .ok_or(DictationError::Unsupported)?;

        match self.state {
            DictationState::ListeningFor(active) if active == field => {
                recognizer.stop();
                self.state = DictationState::Idle;
                return Ok(self.state);
            }
            DictationState::ListeningFor(other) => {
                debug!(stopped = %other, started = %field, "switching dictation field");
                recognizer.stop();
                self.state = DictationState::Idle;
            }
            DictationState::Idle => {}
        }

        recognizer.start()?;
        self.state = DictationState::ListeningFor(field);
        Ok(self.state)
    }

    /// Route a final transcript to the listening field.
    pub fn on_transcript(&self, transcript: &str) -> Option<(DictationField, String)> {
        match self.state {
            DictationState::ListeningFor(field) => Some((field, transcript.to_string())),
            DictationState::Idle => None,
        }
    }

    pub fn on_speech_end(&mut self) {
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        self.state = DictationState::Idle;
    }

    pub fn on_error(&mut self, error: &str) {
        warn!(state = ?self.state, "speech recognition error: {error}");
        self.state = DictationState::Idle;
    }
}
