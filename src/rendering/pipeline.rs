use css_filter::FilterSpec;
use image::RgbaImage;
use std::time::Instant;

use super::compositor::compose;
use super::data_uri::DataUri;
use super::encode::{encode_png, ExportResult};
use super::geometry::UiPlacement;
use super::normalize::Normalizer;
use crate::error::ExportError;
use crate::models::{AppConfig, OutputSpec, PRINT_DPI};

/// Synchronous export pipeline: normalize → filter → (place → composite) → encode.
///
/// Every stage is CPU bound. Async callers go through
/// [`crate::services::ExportService`], which moves the work off the runtime.
pub struct ExportPipeline {
    normalizer: Normalizer,
}

impl ExportPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.svg_working_size, config.fonts_dir.as_deref()),
        }
    }

    /// Filter-only export: the design at its normalized size.
    pub fn filtered(
        &self,
        source: &DataUri,
        filter: &FilterSpec,
    ) -> Result<ExportResult, ExportError> {
        let started = Instant::now();
        let design = self.prepare(source, filter)?;
        let result = encode_png(&design, PRINT_DPI)?;

        tracing::info!(
            width = result.width,
            height = result.height,
            size_bytes = result.png.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Filtered export complete"
        );
        Ok(result)
    }

    /// Canvas-composite export: the design placed on a transparent product canvas.
    pub fn print(
        &self,
        source: &DataUri,
        filter: &FilterSpec,
        output: &OutputSpec,
        placement: &UiPlacement,
    ) -> Result<ExportResult, ExportError> {
        let started = Instant::now();
        let design = self.prepare(source, filter)?;

        let rect = placement.to_canvas(output, design.width(), design.height());
        tracing::debug!(
            left = rect.left,
            top = rect.top,
            width = rect.width,
            height = rect.height,
            scale_percent = placement.scale_percent,
            offset_x = placement.offset_x,
            offset_y = placement.offset_y,
            "Computed canvas placement"
        );

        let canvas = compose(&design, &rect, output);
        let result = encode_png(&canvas, output.dpi)?;

        tracing::info!(
            width = result.width,
            height = result.height,
            dpi = result.dpi,
            inches = ?output.inches(),
            size_bytes = result.png.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Print export complete"
        );
        Ok(result)
    }

    /// Decode and filter the design.
    fn prepare(&self, source: &DataUri, filter: &FilterSpec) -> Result<RgbaImage, ExportError> {
        let normalized = self.normalizer.normalize(&source.bytes, &source.mime)?;
        tracing::debug!(
            format = ?normalized.format,
            width = normalized.width(),
            height = normalized.height(),
            "Normalized design"
        );

        if filter.sepia != 0.0 {
            tracing::debug!(sepia = filter.sepia, "Sepia requested but not rendered");
        }

        let mut design = normalized.image;
        if !filter.is_neutral() {
            css_filter::apply_in_place(filter, &mut design)?;
            tracing::debug!(?filter, "Applied filter");
        }
        Ok(design)
    }
}
