//! Transformation lifecycle controller.
//!
//! Sole owner of [`SessionState`] and the only caller of the configured
//! [`Transformer`]. Shared between tasks behind an `Arc`; every transition
//! happens under one short-lived lock that is never held across an await.

use super::state::SessionState;
use crate::error::TransformError;
use crate::llm::Transformer;
use crate::media::ImagePayload;
use crate::prompt::{TransformationParameters, build_request};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// What a call to [`LifecycleController::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Completed(ImagePayload),
    Failed(TransformError),
    /// A transformer call is still outstanding, possibly one already
    /// superseded; nothing was sent.
    AlreadyInFlight,
    /// No source selected; nothing was sent.
    NoSource,
    /// The source was replaced or the session reset while the request ran.
    /// The reply was dropped.
    Superseded,
}

struct Inner {
    state: SessionState,
    params: TransformationParameters,
    /// Bumped whenever the source changes or the session resets.
    epoch: u64,
    /// A transformer call is pending. Outlives `InFlight` when the session
    /// moves on before the reply arrives.
    outstanding: bool,
}

/// Holds the outstanding-call slot until dropped, including when the
/// `generate` future itself is dropped mid-request.
struct OutstandingCall<'a> {
    controller: &'a LifecycleController,
    epoch: u64,
}

impl Drop for OutstandingCall<'_> {
    fn drop(&mut self) {
        let mut inner = self.controller.lock();
        inner.outstanding = false;
        if inner.epoch == self.epoch
            && let SessionState::InFlight { source } = &inner.state
        {
            debug!("transformation abandoned before a reply arrived");
            inner.state = SessionState::SourceSelected {
                source: source.clone(),
            };
        }
    }
}

pub struct LifecycleController {
    transformer: Arc<dyn Transformer>,
    defaults: TransformationParameters,
    inner: Mutex<Inner>,
}

impl LifecycleController {
    pub fn new(transformer: Arc<dyn Transformer>, defaults: TransformationParameters) -> Self {
        Self {
            transformer,
            inner: Mutex::new(Inner {
                state: SessionState::Empty,
                params: defaults.clone(),
                epoch: 0,
                outstanding: false,
            }),
            defaults,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn parameters(&self) -> TransformationParameters {
        self.lock().params.clone()
    }

    pub fn update_parameters(&self, edit: impl FnOnce(&mut TransformationParameters)) {
        edit(&mut self.lock().params);
    }

    #[must_use]
    pub fn result(&self) -> Option<ImagePayload> {
        self.lock().state.result().cloned()
    }

    #[must_use]
    pub fn error(&self) -> Option<TransformError> {
        self.lock().state.error().cloned()
    }

    /// Adopt a validated source. Any previous result or error is discarded.
    pub fn select_source(&self, source: ImagePayload) {
        let mut inner = self.lock();
        if inner.state.is_in_flight() {
            debug!("source replaced while a transformation is in flight");
        }
        inner.epoch += 1;
        inner.state = SessionState::SourceSelected { source };
        info!(epoch = inner.epoch, "source selected");
    }

    /// Return to `Empty`. A full reset also restores the default parameters.
    pub fn reset(&self, full: bool) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.state = SessionState::Empty;
        if full {
            inner.params = self.defaults.clone();
        }
        info!(full, "session reset");
    }

    /// Send the current source and parameters to the transformer.
    ///
    /// The outstanding check and the InFlight transition happen under the same
    /// lock, so at most one transformer call is ever pending, even when an
    /// earlier call was superseded and is still draining.
    pub async fn generate(&self) -> GenerateOutcome {
        let (request, epoch) = {
            let mut inner = self.lock();
            if matches!(inner.state, SessionState::Empty) {
                return GenerateOutcome::NoSource;
            }
            if inner.outstanding {
                return GenerateOutcome::AlreadyInFlight;
            }
            let source = match &inner.state {
                SessionState::Empty | SessionState::InFlight { .. } => {
                    return GenerateOutcome::AlreadyInFlight;
                }
                SessionState::SourceSelected { source }
                | SessionState::Completed { source, .. }
                | SessionState::Failed { source, .. } => source.clone(),
            };
            let request = build_request(source.clone(), &inner.params);
            inner.state = SessionState::InFlight { source };
            inner.outstanding = true;
            info!(
                backend = self.transformer.name(),
                age = inner.params.target_age(),
                "starting transformation"
            );
            (request, inner.epoch)
        };

        let call = OutstandingCall {
            controller: self,
            epoch,
        };
        let outcome = self.transformer.transform(&request).await;
        let finished = self.finish(epoch, request.payload, outcome);
        drop(call);
        finished
    }

    fn finish(
        &self,
        epoch: u64,
        source: ImagePayload,
        outcome: Result<ImagePayload, TransformError>,
    ) -> GenerateOutcome {
        let mut inner = self.lock();
        if inner.epoch != epoch {
            debug!(epoch, current = inner.epoch, "dropping stale transformation reply");
            return GenerateOutcome::Superseded;
        }

        match outcome {
            Ok(result) => {
                inner.state = SessionState::Completed {
                    source,
                    result: result.clone(),
                };
                GenerateOutcome::Completed(result)
            }
            Err(error) => {
                warn!(kind = %error.kind, "transformation failed: {error}");
                inner.state = SessionState::Failed {
                    source,
                    error: error.clone(),
                };
                GenerateOutcome::Failed(error)
            }
        }
    }
}
