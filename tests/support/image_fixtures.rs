#![allow(dead_code)]

use agemorph::media::ImagePayload;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// 4x4 RGBA image with a transparent top row.
pub fn rgba_png_bytes() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([20, 120, 200, 255]));
    for x in 0..4 {
        img.put_pixel(x, 0, Rgba([0, 0, 0, 0]));
    }
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

pub fn jpeg_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, Rgba([200, 180, 160, 255]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .to_rgb8()
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

pub fn png_payload() -> ImagePayload {
    ImagePayload::new(rgba_png_bytes(), "image/png")
}
