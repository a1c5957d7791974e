//! Test fixtures: designs encoded as data URIs.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use podmix::rendering::DataUri;

/// Plain colors used across tests
pub mod colors {
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const TEAL: [u8; 4] = [100, 120, 200, 255];
    pub const HALF_WHITE: [u8; 4] = [255, 255, 255, 128];
}

/// A solid `width`×`height` RGBA image
pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Encode an image with the given container format
pub fn encode(image: RgbaImage, format: ImageFormat) -> Vec<u8> {
    let dynamic = match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8()),
        _ => DynamicImage::ImageRgba8(image),
    };
    let mut buf = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode fixture");
    buf
}

pub fn png_data_uri(image: RgbaImage) -> String {
    DataUri::encode("image/png", &encode(image, ImageFormat::Png))
}

pub fn jpeg_data_uri(image: RgbaImage) -> String {
    DataUri::encode("image/jpeg", &encode(image, ImageFormat::Jpeg))
}

pub fn webp_data_uri(image: RgbaImage) -> String {
    DataUri::encode("image/webp", &encode(image, ImageFormat::WebP))
}

pub fn svg_data_uri(svg: &str) -> String {
    DataUri::encode("image/svg+xml", svg.as_bytes())
}

/// A 2:1 SVG with a black background and a white right half
pub const LANDSCAPE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
  <rect width="200" height="100" fill="black"/>
  <rect x="100" width="100" height="100" fill="white"/>
</svg>"#;

/// An SVG that only covers its center, leaving transparent corners
pub const CIRCLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64">
  <circle cx="32" cy="32" r="16" fill="#ff0000"/>
</svg>"##;
