mod advisory;
mod encode;
mod share;

pub use advisory::{ADVISORY_TTL, Advisory, AdvisorySlot};
pub use encode::{EXPORT_BASENAME, ExportFormat, ExportedImage, JPEG_QUALITY, export_image};
pub use share::{SHARE_FILENAME, ShareArtifact, ShareFuture, ShareTarget, share_result};
