//! Placement mapping between the editor preview and the output targets.
//!
//! The editor shows the design on a fixed 500px square preview canvas, with
//! an unscaled footprint of 280px. A placement is a scale percentage plus an
//! offset from the canvas center, in percent of the canvas side.
//!
//! Both outputs derive from [`UiPlacement::relative_center`], so the
//! downloadable file and the marketplace submission put the design at the
//! same relative position:
//!
//! - [`UiPlacement::to_canvas`]: absolute pixel rectangle on the export canvas
//! - [`UiPlacement::to_print_area`]: normalized 0..1 print-area placement

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ExportError;
use crate::models::OutputSpec;

/// Side of the square editor preview canvas, in preview pixels
pub const PREVIEW_CANVAS_PX: f64 = 500.0;

/// Footprint of the design at 100% scale on the preview canvas
pub const PREVIEW_DESIGN_PX: f64 = 280.0;

/// Print-area width fraction covered by the design at 100% scale
pub const PRINT_AREA_BASE_SCALE: f64 = 0.7;

/// Scale factor the marketplace default placement assumes
pub const DEFAULT_MARKETPLACE_UI_SCALE: f64 = 0.9;

/// A placement in editor preview terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiPlacement {
    /// Horizontal offset from center, percent of the preview side (-50..50)
    pub offset_x: f64,
    /// Vertical offset from center, percent of the preview side (-50..50)
    pub offset_y: f64,
    /// Design size in percent of the 280px base footprint
    pub scale_percent: f64,
}

impl Default for UiPlacement {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_percent: 100.0,
        }
    }
}

impl UiPlacement {
    pub fn new(offset_x: f64, offset_y: f64, scale_percent: f64) -> Result<Self, ExportError> {
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return Err(ExportError::InvalidInput(
                "position.x and position.y must be finite numbers".to_string(),
            ));
        }
        if !scale_percent.is_finite() || scale_percent <= 0.0 {
            return Err(ExportError::InvalidInput(
                "scale must be a positive number".to_string(),
            ));
        }
        Ok(Self {
            offset_x,
            offset_y,
            scale_percent,
        })
    }

    /// Placement the marketplace uses when the editor sent none.
    pub fn marketplace_default() -> Self {
        Self {
            scale_percent: DEFAULT_MARKETPLACE_UI_SCALE * 100.0,
            ..Self::default()
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_percent / 100.0
    }

    /// Offset from the preview center in preview pixels.
    pub fn preview_offset_px(&self) -> (f64, f64) {
        (
            self.offset_x / 100.0 * PREVIEW_CANVAS_PX,
            self.offset_y / 100.0 * PREVIEW_CANVAS_PX,
        )
    }

    /// Displayed design size on the preview canvas.
    pub fn preview_size_px(&self) -> f64 {
        PREVIEW_DESIGN_PX * self.scale_factor()
    }

    /// Design center as a fraction of the canvas, unclamped.
    pub fn relative_center(&self) -> (f64, f64) {
        (0.5 + self.offset_x / 100.0, 0.5 + self.offset_y / 100.0)
    }

    /// Pixel rectangle for an `image_width`×`image_height` design on `output`.
    ///
    /// The preview is mapped onto the output by `min(width, height) / 500`.
    /// The longer image side gets the scaled footprint and the shorter one
    /// follows the aspect ratio. A footprint larger than the canvas is shrunk
    /// to fit, and the rectangle is clamped so it never leaves the canvas.
    pub fn to_canvas(
        &self,
        output: &OutputSpec,
        image_width: u32,
        image_height: u32,
    ) -> CanvasPlacement {
        let canvas_w = output.width as f64;
        let canvas_h = output.height as f64;
        let image_w = image_width.max(1) as f64;
        let image_h = image_height.max(1) as f64;

        let export_scale = canvas_w.min(canvas_h) / PREVIEW_CANVAS_PX;
        // Side ratios stay in (0, 1], so a huge footprint never overflows
        let (ratio_w, ratio_h) = if image_w > image_h {
            (1.0, image_h / image_w)
        } else {
            (image_w / image_h, 1.0)
        };
        let fit = (canvas_w / ratio_w).min(canvas_h / ratio_h);
        let size = (self.preview_size_px() * export_scale).min(fit);
        let w = size * ratio_w;
        let h = size * ratio_h;

        let width = (w.round() as u32).clamp(1, output.width);
        let height = (h.round() as u32).clamp(1, output.height);

        let (rel_x, rel_y) = self.relative_center();
        let center_x = rel_x * canvas_w;
        let center_y = rel_y * canvas_h;

        let left = clamp_edge(center_x - width as f64 / 2.0, output.width - width);
        let top = clamp_edge(center_y - height as f64 / 2.0, output.height - height);

        CanvasPlacement {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalized print-area placement for marketplace product creation.
    pub fn to_print_area(&self) -> PrintAreaPlacement {
        let (x, y) = self.relative_center();
        PrintAreaPlacement {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
            scale: PRINT_AREA_BASE_SCALE * self.scale_factor(),
        }
    }
}

fn clamp_edge(edge: f64, max: u32) -> u32 {
    edge.round().clamp(0.0, max as f64) as u32
}

/// Absolute design rectangle on the export canvas, in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CanvasPlacement {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CanvasPlacement {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.left as f64 + self.width as f64 / 2.0,
            self.top as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Normalized print-area placement: (0.5, 0.5) is the center and `scale`
/// is a fraction of the print-area width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PrintAreaPlacement {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for PrintAreaPlacement {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            scale: 0.63,
        }
    }
}
