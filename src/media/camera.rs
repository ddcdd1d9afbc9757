//! Camera path of the Image Source Adapter.
//!
//! A [`CameraSession`] owns the device stream for its whole lifetime. The
//! stream is acquired in [`CameraSession::open`] and released exactly once,
//! either explicitly through [`CameraSession::close`] or by `Drop` on every
//! other exit path (cancel, error, early return).

use super::source::{PickedFile, payload_from_file};
use super::types::ImagePayload;
use crate::error::SourceError;
use image::{DynamicImage, ImageFormat, RgbaImage, imageops::FilterType};
use std::io::Cursor;
use tracing::{debug, info, warn};

pub const CAPTURE_FILENAME: &str = "capture.png";

/// A capture device that can hand out a live stream.
pub trait CameraDevice {
    type Stream: FrameStream;

    fn acquire(&mut self) -> Result<Self::Stream, SourceError>;
}

/// A live stream of frames from an acquired device.
pub trait FrameStream {
    /// Native frame size; captures are rendered into a buffer of this size.
    fn dimensions(&self) -> (u32, u32);

    fn current_frame(&mut self) -> Result<RgbaImage, SourceError>;

    /// Stop all tracks. Called once by the owning session.
    fn release(&mut self);
}

pub struct CameraSession<S: FrameStream> {
    stream: Option<S>,
}

impl<S: FrameStream> CameraSession<S> {
    /// Acquire the device stream. Any acquisition failure is reported as
    /// `DeviceUnavailable`.
    pub fn open<D>(device: &mut D) -> Result<Self, SourceError>
    where
        D: CameraDevice<Stream = S>,
    {
        let stream = device.acquire().map_err(|err| {
            warn!("camera acquisition failed: {err}");
            match err {
                SourceError::DeviceUnavailable(_) => err,
                other => SourceError::DeviceUnavailable(other.to_string()),
            }
        })?;
        let (width, height) = stream.dimensions();
        info!(width, height, "camera stream acquired");
        Ok(Self {
            stream: Some(stream),
        })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Render the current frame into a fixed-size buffer and encode it as PNG.
    pub fn capture(&mut self) -> Result<ImagePayload, SourceError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| SourceError::DeviceUnavailable("stream already released".into()))?;

        let (width, height) = stream.dimensions();
        let frame = stream.current_frame()?;
        let buffer = render_into(frame, width, height);
        let png = encode_png(buffer)?;
        debug!(width, height, bytes = png.len(), "captured camera frame");

        payload_from_file(PickedFile {
            name: Some(CAPTURE_FILENAME.into()),
            content_type: "image/png".into(),
            bytes: png,
        })
    }

    /// Release the stream now instead of waiting for drop.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
            info!("camera stream released");
        }
    }
}

impl<S: FrameStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}

fn render_into(frame: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if frame.dimensions() == (width, height) {
        return frame;
    }
    image::imageops::resize(&frame, width, height, FilterType::Triangle)
}

fn encode_png(buffer: RgbaImage) -> Result<Vec<u8>, SourceError> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| SourceError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}
