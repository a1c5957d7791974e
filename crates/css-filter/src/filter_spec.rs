//! Structured filter adjustments.

use std::convert::Infallible;
use std::str::FromStr;

/// Numeric adjustments parsed from a CSS-like filter descriptor.
///
/// `FilterSpec` is a plain immutable value. Build one with [`crate::parse`]
/// (or `str::parse`), or start from [`FilterSpec::NEUTRAL`] and override
/// fields with struct update syntax.
///
/// # Example
///
/// ```
/// use css_filter::FilterSpec;
///
/// let spec: FilterSpec = "contrast(120%) invert(1)".parse().unwrap();
/// assert_eq!(spec.contrast, 1.2);
/// assert!(spec.invert);
/// assert_eq!(spec.brightness, 1.0);
///
/// let custom = FilterSpec { saturation: 0.0, ..FilterSpec::NEUTRAL };
/// assert!(!custom.is_neutral());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Brightness multiplier (1.0 = no change)
    pub brightness: f32,
    /// Contrast factor around the 128 midpoint (1.0 = no change)
    pub contrast: f32,
    /// Saturation factor relative to the pixel's gray equivalent (1.0 = no change)
    pub saturation: f32,
    /// Sepia amount. Parsed and carried, never rendered.
    pub sepia: f32,
    /// Replace color channels with their complement
    pub invert: bool,
}

impl FilterSpec {
    /// The all-neutral spec: applying it leaves pixels untouched.
    pub const NEUTRAL: Self = Self {
        brightness: 1.0,
        contrast: 1.0,
        saturation: 1.0,
        sepia: 0.0,
        invert: false,
    };

    /// True when no rendered adjustment would change a pixel.
    ///
    /// `sepia` does not count, since it is never rendered.
    pub fn is_neutral(&self) -> bool {
        !self.adjusts_modulation() && !self.adjusts_contrast() && !self.invert
    }

    /// Whether the combined brightness/saturation stage runs.
    #[inline]
    pub fn adjusts_modulation(&self) -> bool {
        self.brightness != 1.0 || self.saturation != 1.0
    }

    /// Whether the contrast stage runs.
    #[inline]
    pub fn adjusts_contrast(&self) -> bool {
        self.contrast != 1.0
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl FromStr for FilterSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::parse(s))
    }
}
