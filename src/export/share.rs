use crate::error::ExportError;
use crate::media::ImagePayload;
use std::future::Future;
use std::pin::Pin;
use tracing::warn;

/// Shared artifacts always carry this name, whatever the result's encoding.
pub const SHARE_FILENAME: &str = "generated-image.png";

/// A file packaged for a native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareArtifact {
    pub payload: ImagePayload,
    pub filename: String,
    pub title: String,
    pub text: String,
}

pub type ShareFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ExportError>> + Send + 'a>>;

/// Platform sharing capability.
pub trait ShareTarget: Send + Sync {
    /// Whether this target accepts file artifacts like `artifact`.
    fn can_share(&self, artifact: &ShareArtifact) -> bool;

    /// Hand the artifact over. Cancellation by the user is an error.
    fn share<'a>(&'a self, artifact: &'a ShareArtifact) -> ShareFuture<'a>;
}

/// Package `result` and offer it to `target`.
///
/// Every failure comes back as a share error kind; callers surface it as an
/// advisory and leave the session untouched.
pub async fn share_result(
    target: Option<&dyn ShareTarget>,
    result: &ImagePayload,
) -> Result<(), ExportError> {
    let artifact = ShareArtifact {
        payload: result.clone(),
        filename: SHARE_FILENAME.to_string(),
        title: t!("shareTitle").to_string(),
        text: t!("shareText").to_string(),
    };

    let Some(target) = target.filter(|t| t.can_share(&artifact)) else {
        warn!("share requested but no file-capable share target is available");
        return Err(ExportError::ShareUnsupported);
    };

    target.share(&artifact).await.map_err(|e| {
        warn!("share failed: {e}");
        match e {
            ExportError::ShareUnsupported | ExportError::ShareFailed(_) => e,
            other => ExportError::ShareFailed(other.to_string()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::Mutex;

    struct RecordingTarget {
        accepts: bool,
        fail_with: Option<String>,
        shared: Mutex<Vec<ShareArtifact>>,
    }

    impl RecordingTarget {
        fn new(accepts: bool, fail_with: Option<&str>) -> Self {
            Self {
                accepts,
                fail_with: fail_with.map(String::from),
                shared: Mutex::new(Vec::new()),
            }
        }
    }

    impl ShareTarget for RecordingTarget {
        fn can_share(&self, _artifact: &ShareArtifact) -> bool {
            self.accepts
        }

        fn share<'a>(&'a self, artifact: &'a ShareArtifact) -> ShareFuture<'a> {
            Box::pin(async move {
                if let Some(reason) = &self.fail_with {
                    return Err(ExportError::ShareFailed(reason.clone()));
                }
                self.shared.lock().unwrap().push(artifact.clone());
                Ok(())
            })
        }
    }

    fn result() -> ImagePayload {
        ImagePayload::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg")
    }

    #[tokio::test]
    async fn packages_result_with_fixed_name_and_caption() {
        let target = RecordingTarget::new(true, None);
        share_result(Some(&target), &result()).await.unwrap();

        let shared = target.shared.lock().unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].filename, "generated-image.png");
        assert_eq!(shared[0].payload, result());
        assert!(!shared[0].title.is_empty());
        assert!(!shared[0].text.is_empty());
    }

    #[tokio::test]
    async fn missing_or_incapable_target_is_unsupported() {
        let err = share_result(None, &result()).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ShareUnsupported));

        let target = RecordingTarget::new(false, None);
        let err = share_result(Some(&target), &result()).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ShareUnsupported));
    }

    #[tokio::test]
    async fn target_failure_is_share_failed() {
        let target = RecordingTarget::new(true, Some("user cancelled"));
        let err = share_result(Some(&target), &result()).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ShareFailed));
        assert!(err.to_string().contains("user cancelled"));
    }
}
