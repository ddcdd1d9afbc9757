use crate::error::TransformError;
use crate::media::ImagePayload;
use crate::prompt::TransformationRequest;
use std::future::Future;
use std::pin::Pin;

pub type TransformFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImagePayload, TransformError>> + Send + 'a>>;

/// Remote Transformation Client boundary.
///
/// One call is one attempt: implementations never retry.
pub trait Transformer: Send + Sync {
    /// Backend identifier (e.g. "gemini").
    fn name(&self) -> &str;

    fn transform<'a>(&'a self, request: &'a TransformationRequest) -> TransformFuture<'a>;
}
