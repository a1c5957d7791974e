//! Image normalization: any supported payload in, RGBA8 raster out.

use image::RgbaImage;
use resvg::usvg::{self, Transform};
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;

use super::format::ImageFormat;
use crate::error::ExportError;

/// A decoded design ready for filtering.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub image: RgbaImage,
    /// Format the payload was handled as
    pub format: ImageFormat,
}

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Turns raster and vector payloads into RGBA8 buffers.
///
/// SVG input is rasterized with resvg into a square working box, fitted
/// inside it with its aspect ratio preserved. Everything else goes through
/// the `image` crate decoders.
pub struct Normalizer {
    /// Font database for text in SVG designs
    fontdb: Arc<fontdb::Database>,
    working_size: u32,
}

impl Normalizer {
    /// Create a normalizer with system fonts plus an optional extra font directory.
    pub fn new(working_size: u32, fonts_dir: Option<&Path>) -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();

        if let Some(dir) = fonts_dir {
            fontdb.load_fonts_dir(dir);
            tracing::debug!(dir = %dir.display(), "Loaded font directory");
        }

        tracing::info!(
            font_count = fontdb.len(),
            working_size,
            "Loaded fonts for SVG rasterization"
        );

        Self {
            fontdb: Arc::new(fontdb),
            working_size,
        }
    }

    /// Decode `bytes` into RGBA8.
    ///
    /// Content sniffing wins over `declared_mime`: an SVG document labelled
    /// `image/png` is still rasterized as SVG.
    pub fn normalize(
        &self,
        bytes: &[u8],
        declared_mime: &str,
    ) -> Result<NormalizedImage, ExportError> {
        if bytes.is_empty() {
            return Err(ExportError::empty_image());
        }

        let format = ImageFormat::detect(bytes, declared_mime);
        tracing::debug!(
            declared_mime,
            detected = ?format,
            size_bytes = bytes.len(),
            "Normalizing image"
        );

        let image = if format.is_vector() {
            self.rasterize_svg(bytes)?
        } else {
            decode_raster(bytes, declared_mime)?
        };

        if image.width() == 0 || image.height() == 0 {
            return Err(ExportError::UnsupportedFormat {
                mime: declared_mime.to_string(),
                reason: "image has zero width or height".to_string(),
            });
        }

        Ok(NormalizedImage { image, format })
    }

    /// Parse and rasterize SVG onto a transparent pixmap
    fn rasterize_svg(&self, svg_data: &[u8]) -> Result<RgbaImage, ExportError> {
        let unsupported = |reason: String| ExportError::UnsupportedFormat {
            mime: ImageFormat::Svg.mime().to_string(),
            reason,
        };

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            // Embedded data: images only; never read files named by the document
            image_href_resolver: usvg::ImageHrefResolver {
                resolve_data: usvg::ImageHrefResolver::default_data_resolver(),
                resolve_string: Box::new(
                    |_: &str, _: &usvg::Options| -> Option<usvg::ImageKind> { None },
                ),
            },
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| unsupported(format!("SVG parse error: {e}")))?;

        let svg_size = tree.size();
        let (width, height) = fit_inside(svg_size.width(), svg_size.height(), self.working_size)
            .ok_or_else(|| unsupported("SVG has no usable size".to_string()))?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ExportError::Processing(format!("failed to allocate {width}x{height} pixmap"))
        })?;

        let transform = Transform::from_scale(
            width as f32 / svg_size.width(),
            height as f32 / svg_size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        tracing::debug!(
            svg_width = svg_size.width(),
            svg_height = svg_size.height(),
            width,
            height,
            "Rasterized SVG"
        );

        pixmap_to_rgba(&pixmap)
    }
}

/// Largest integer size with the same aspect ratio that fits in `box_size`².
fn fit_inside(width: f32, height: f32, box_size: u32) -> Option<(u32, u32)> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return None;
    }
    let scale = box_size as f32 / width.max(height);
    let w = (width * scale).round().clamp(1.0, box_size as f32) as u32;
    let h = (height * scale).round().clamp(1.0, box_size as f32) as u32;
    Some((w, h))
}

/// tiny-skia stores premultiplied alpha; the rest of the pipeline expects straight alpha.
fn pixmap_to_rgba(pixmap: &Pixmap) -> Result<RgbaImage, ExportError> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| ExportError::Processing("pixmap buffer size mismatch".to_string()))
}

fn decode_raster(bytes: &[u8], declared_mime: &str) -> Result<RgbaImage, ExportError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| decode_error(e, declared_mime))?;
    Ok(decoded.to_rgba8())
}

/// Decoder limits mean a readable but oversized image, not a bad format.
fn decode_error(error: image::ImageError, declared_mime: &str) -> ExportError {
    match error {
        image::ImageError::Limits(e) => {
            ExportError::InvalidInput(format!("Image is too large to decode: {e}"))
        }
        e => ExportError::UnsupportedFormat {
            mime: declared_mime.to_string(),
            reason: e.to_string(),
        },
    }
}
