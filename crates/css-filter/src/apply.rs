//! Pixel-level application of a [`FilterSpec`].
//!
//! All stages work on interleaved RGBA8 data and never read or write the
//! alpha byte. Each stage rounds to the nearest integer and clamps to
//! `0..=255` before the next stage sees the value.

use crate::{FilterError, FilterSpec};

/// Rec.709 luma weights, the same weights the CSS `saturate()` matrix uses.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Apply `spec` to an RGBA8 buffer, returning a new buffer.
///
/// The input is never modified. A neutral spec returns a byte-identical copy.
///
/// # Errors
///
/// [`FilterError::InvalidBufferLength`] if `rgba.len()` is not a multiple of 4.
///
/// # Example
///
/// ```
/// use css_filter::{apply, parse};
///
/// let spec = parse("invert(1)");
/// let out = apply(&spec, &[10, 20, 30, 40]).unwrap();
/// assert_eq!(out, vec![245, 235, 225, 40]);
/// ```
pub fn apply(spec: &FilterSpec, rgba: &[u8]) -> Result<Vec<u8>, FilterError> {
    let mut out = rgba.to_vec();
    apply_in_place(spec, &mut out)?;
    Ok(out)
}

/// Apply `spec` to an RGBA8 buffer in place.
///
/// Stage order is fixed: brightness/saturation, then contrast, then invert.
/// Stages whose parameters are neutral are skipped entirely.
pub fn apply_in_place(spec: &FilterSpec, rgba: &mut [u8]) -> Result<(), FilterError> {
    if rgba.len() % 4 != 0 {
        return Err(FilterError::InvalidBufferLength(rgba.len()));
    }

    if spec.adjusts_modulation() {
        modulate(rgba, spec.brightness, spec.saturation);
    }

    if spec.adjusts_contrast() {
        let lut = contrast_lut(spec.contrast);
        for px in rgba.chunks_exact_mut(4) {
            px[0] = lut[px[0] as usize];
            px[1] = lut[px[1] as usize];
            px[2] = lut[px[2] as usize];
        }
    }

    if spec.invert {
        for px in rgba.chunks_exact_mut(4) {
            px[0] = 255 - px[0];
            px[1] = 255 - px[1];
            px[2] = 255 - px[2];
        }
    }

    Ok(())
}

/// Combined brightness and saturation pass.
///
/// Channels are first scaled by `brightness`, then moved toward
/// (`saturation < 1`) or away from (`saturation > 1`) the scaled pixel's
/// luma. Rounding happens once, at the end.
fn modulate(rgba: &mut [u8], brightness: f32, saturation: f32) {
    for px in rgba.chunks_exact_mut(4) {
        let r = px[0] as f32 * brightness;
        let g = px[1] as f32 * brightness;
        let b = px[2] as f32 * brightness;
        let gray = LUMA_R * r + LUMA_G * g + LUMA_B * b;

        px[0] = to_channel(gray + saturation * (r - gray));
        px[1] = to_channel(gray + saturation * (g - gray));
        px[2] = to_channel(gray + saturation * (b - gray));
    }
}

/// Lookup table for `out = c * in + 128 * (1 - c)`.
fn contrast_lut(contrast: f32) -> [u8; 256] {
    let offset = 128.0 * (1.0 - contrast);
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = to_channel(contrast * i as f32 + offset);
    }
    lut
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn gradient() -> Vec<u8> {
        (0..=255u8)
            .flat_map(|v| [v, 255 - v, v / 2, v])
            .collect()
    }

    #[test]
    fn test_neutral_is_identity() {
        let input = gradient();
        let out = apply(&parse("none"), &input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_sepia_only_is_identity() {
        let input = gradient();
        let out = apply(&parse("sepia(1)"), &input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_invert_is_involutive() {
        let input = gradient();
        let spec = parse("invert(1)");
        let once = apply(&spec, &input).unwrap();
        assert_ne!(once, input);
        let twice = apply(&spec, &once).unwrap();
        assert_eq!(twice, input);
    }

    #[test]
    fn test_alpha_untouched() {
        let input = gradient();
        let spec = parse("brightness(1.4) contrast(2) saturate(0) invert(1)");
        let out = apply(&spec, &input).unwrap();
        for (a, b) in input.chunks_exact(4).zip(out.chunks_exact(4)) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_contrast_formula() {
        let spec = parse("contrast(1.1)");
        // 1.1 * 200 - 12.8 = 207.2
        // 1.1 * 0 - 12.8 clamps to 0
        // 128 is the fixed point
        let out = apply(&spec, &[200, 0, 128, 255]).unwrap();
        assert_eq!(out, vec![207, 0, 128, 255]);
    }

    #[test]
    fn test_contrast_zero_is_flat_gray() {
        let out = apply(&parse("contrast(0)"), &[0, 90, 255, 7]).unwrap();
        assert_eq!(out, vec![128, 128, 128, 7]);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let out = apply(&parse("brightness(1.05)"), &[100, 200, 250, 255]).unwrap();
        // 250 * 1.05 = 262.5 clamps to 255
        assert_eq!(out, vec![105, 210, 255, 255]);
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let out = apply(&parse("saturate(0)"), &[255, 0, 0, 255]).unwrap();
        // luma of pure red = 0.2126 * 255 = 54.2
        assert_eq!(out, vec![54, 54, 54, 255]);
    }

    #[test]
    fn test_saturation_leaves_grays_alone() {
        let out = apply(&parse("saturate(3)"), &[77, 77, 77, 255]).unwrap();
        assert_eq!(out, vec![77, 77, 77, 255]);
    }

    #[test]
    fn test_stage_order_contrast_before_invert() {
        // contrast first: 1.1 * 200 - 12.8 = 207, then invert -> 48
        let out = apply(&parse("invert(1) contrast(1.1)"), &[200, 200, 200, 255]).unwrap();
        assert_eq!(out, vec![48, 48, 48, 255]);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = vec![10, 20, 30, 255];
        let _ = apply(&parse("invert(1)"), &input).unwrap();
        assert_eq!(input, vec![10, 20, 30, 255]);
    }

    #[test]
    fn test_rejects_partial_pixels() {
        let err = apply(&parse("invert(1)"), &[1, 2, 3]).unwrap_err();
        assert_eq!(err, FilterError::InvalidBufferLength(3));
    }
}
