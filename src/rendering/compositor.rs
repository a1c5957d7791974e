use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::geometry::CanvasPlacement;
use crate::models::OutputSpec;

/// Place `design` on a fully transparent `output`-sized canvas.
///
/// The design is resampled with Lanczos3 to the placement footprint and
/// overlaid with normal alpha blending. `placement` must lie inside the
/// canvas, which [`super::geometry::UiPlacement::to_canvas`] guarantees.
pub fn compose(design: &RgbaImage, placement: &CanvasPlacement, output: &OutputSpec) -> RgbaImage {
    let mut canvas = RgbaImage::new(output.width, output.height);

    let x = placement.left as i64;
    let y = placement.top as i64;

    if design.dimensions() == (placement.width, placement.height) {
        imageops::overlay(&mut canvas, design, x, y);
    } else {
        let resized = imageops::resize(
            design,
            placement.width,
            placement.height,
            FilterType::Lanczos3,
        );
        imageops::overlay(&mut canvas, &resized, x, y);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn output(width: u32, height: u32) -> OutputSpec {
        OutputSpec {
            width,
            height,
            dpi: 300,
        }
    }

    #[test]
    fn test_canvas_is_transparent_outside_design() {
        let design = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let placement = CanvasPlacement {
            left: 2,
            top: 3,
            width: 4,
            height: 4,
        };
        let canvas = compose(&design, &placement, &output(10, 12));

        assert_eq!(canvas.dimensions(), (10, 12));
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(9, 11).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(2, 3).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(5, 6).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(6, 7).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_design_is_resized_to_footprint() {
        let design = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]));
        let placement = CanvasPlacement {
            left: 10,
            top: 10,
            width: 30,
            height: 30,
        };
        let canvas = compose(&design, &placement, &output(50, 50));

        assert_eq!(canvas.get_pixel(25, 25).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(9, 25)[3], 0);
        assert_eq!(canvas.get_pixel(40, 25)[3], 0);
    }

    #[test]
    fn test_transparent_design_pixels_stay_transparent() {
        let design = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([200, 200, 200, 0])
            }
        });
        let placement = CanvasPlacement {
            left: 0,
            top: 0,
            width: 2,
            height: 1,
        };
        let canvas = compose(&design, &placement, &output(2, 1));

        assert_eq!(canvas.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(canvas.get_pixel(1, 0)[3], 0);
    }
}
