//! Re-encoding of a result image for download.

use crate::error::ExportError;
use crate::media::ImagePayload;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_BASENAME: &str = "generated-image";
pub const JPEG_QUALITY: u8 = 90;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless; transparency preserved.
    #[default]
    Png,
    /// Lossy at quality 90, transparency flattened onto white.
    Jpeg,
}

impl ExportFormat {
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    #[must_use]
    pub fn filename(self) -> String {
        format!("{EXPORT_BASENAME}.{self}")
    }
}

/// A downloadable artifact: the re-encoded image and its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub payload: ImagePayload,
    pub filename: String,
}

impl ExportedImage {
    /// Write the artifact into `dir` and return the full path.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, self.payload.bytes()).await?;
        info!(path = %path.display(), bytes = self.payload.len(), "exported image");
        Ok(path)
    }
}

/// Re-render `result` in the requested encoding.
pub fn export_image(result: &ImagePayload, format: ExportFormat) -> Result<ExportedImage, ExportError> {
    let decoded = image::load_from_memory(result.bytes())
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    let bytes = match format {
        ExportFormat::Png => encode_png(&decoded),
        ExportFormat::Jpeg => encode_jpeg(&decoded),
    }
    .map_err(|e| ExportError::Encode {
        format: format.to_string(),
        message: e.to_string(),
    })?;

    Ok(ExportedImage {
        payload: ImagePayload::new(bytes, format.mime_type()),
        filename: format.filename(),
    })
}

fn encode_png(img: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

fn encode_jpeg(img: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let rgba = img.to_rgba8();
    let mut canvas = RgbaImage::from_pixel(rgba.width(), rgba.height(), Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut canvas, &rgba, 0, 0);
    let flattened = DynamicImage::ImageRgba8(canvas).to_rgb8();

    let mut buffer = Vec::new();
    flattened.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))?;
    Ok(buffer)
}
