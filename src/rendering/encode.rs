use image::RgbaImage;
use std::io::Cursor;

use super::data_uri::DataUri;
use crate::error::ExportError;

const METERS_PER_INCH: f64 = 0.0254;

/// Final export artifact: an RGBA PNG plus what it declares about itself.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl ExportResult {
    pub fn to_data_uri(&self) -> String {
        DataUri::encode("image/png", &self.png)
    }
}

/// Encode RGBA8 as PNG with a `pHYs` chunk declaring `dpi`.
///
/// The tag is informational only. Pixel count is left alone.
pub fn encode_png(image: &RgbaImage, dpi: u32) -> Result<ExportResult, ExportError> {
    let (width, height) = image.dimensions();
    let ppm = dpi_to_ppm(dpi);

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }

    Ok(ExportResult {
        png: buf.into_inner(),
        width,
        height,
        dpi,
    })
}

/// 300 DPI is 11811 pixels per meter.
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Read the declared resolution back out of a PNG, if it has a metric `pHYs` chunk.
pub fn read_png_dpi(png_bytes: &[u8]) -> Option<u32> {
    let reader = png::Decoder::new(Cursor::new(png_bytes)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    match dims.unit {
        png::Unit::Meter => Some((dims.xppu as f64 * METERS_PER_INCH).round() as u32),
        png::Unit::Unspecified => None,
    }
}
