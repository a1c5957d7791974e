use crate::error::ExportError;

/// Resolution tag written into every exported PNG.
pub const PRINT_DPI: u32 = 300;

/// Caps on the product canvas a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLimits {
    /// Largest width or height in pixels
    pub max_dimension: u32,
    /// Largest width × height
    pub max_pixels: u64,
}

impl OutputLimits {
    /// No caps beyond `u32` sides, for pure geometry that never allocates a canvas.
    pub const UNBOUNDED: Self = Self {
        max_dimension: u32::MAX,
        max_pixels: u64::MAX,
    };
}

/// Physical output canvas for the canvas-composite export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSpec {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl OutputSpec {
    /// Validate caller-supplied product dimensions.
    ///
    /// Dimensions arrive as JSON numbers, so fractional, negative and
    /// non-finite values are all possible and all rejected. The canvas is
    /// allocated in full, so its area is capped as well as each side.
    pub fn from_dimensions(
        width: f64,
        height: f64,
        limits: &OutputLimits,
    ) -> Result<Self, ExportError> {
        let width = Self::dimension("productWidth", width, limits.max_dimension)?;
        let height = Self::dimension("productHeight", height, limits.max_dimension)?;

        let pixels = width as u64 * height as u64;
        if pixels > limits.max_pixels {
            return Err(ExportError::InvalidInput(format!(
                "productWidth x productHeight ({width}x{height} = {pixels} pixels) exceeds the maximum of {} pixels",
                limits.max_pixels
            )));
        }

        Ok(Self {
            width,
            height,
            dpi: PRINT_DPI,
        })
    }

    fn dimension(name: &str, value: f64, max: u32) -> Result<u32, ExportError> {
        if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 {
            return Err(ExportError::InvalidInput(format!(
                "{name} must be a positive integer"
            )));
        }
        if value > max as f64 {
            return Err(ExportError::InvalidInput(format!(
                "{name} exceeds the maximum of {max} pixels"
            )));
        }
        Ok(value as u32)
    }

    /// Physical print size in inches at the tagged resolution.
    pub fn inches(&self) -> (f64, f64) {
        (
            self.width as f64 / self.dpi as f64,
            self.height as f64 / self.dpi as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: OutputLimits = OutputLimits {
        max_dimension: 20_000,
        max_pixels: 100_000_000,
    };

    #[test]
    fn test_valid_dimensions() {
        let spec = OutputSpec::from_dimensions(4500.0, 5400.0, &LIMITS).unwrap();
        assert_eq!(spec.width, 4500);
        assert_eq!(spec.height, 5400);
        assert_eq!(spec.dpi, 300);
        assert_eq!(spec.inches(), (15.0, 18.0));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(OutputSpec::from_dimensions(0.0, 100.0, &LIMITS).is_err());
        assert!(OutputSpec::from_dimensions(100.0, -5.0, &LIMITS).is_err());
    }

    #[test]
    fn test_rejects_fractional_and_non_finite() {
        assert!(OutputSpec::from_dimensions(10.5, 100.0, &LIMITS).is_err());
        assert!(OutputSpec::from_dimensions(f64::NAN, 100.0, &LIMITS).is_err());
        assert!(OutputSpec::from_dimensions(100.0, f64::INFINITY, &LIMITS).is_err());
    }

    #[test]
    fn test_rejects_oversized() {
        let err = OutputSpec::from_dimensions(30_000.0, 100.0, &LIMITS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "productWidth exceeds the maximum of 20000 pixels"
        );
    }

    #[test]
    fn test_error_names_field() {
        let err = OutputSpec::from_dimensions(100.0, 0.0, &LIMITS).unwrap_err();
        assert_eq!(err.to_string(), "productHeight must be a positive integer");
    }

    #[test]
    fn test_rejects_oversized_area() {
        let err = OutputSpec::from_dimensions(20_000.0, 20_000.0, &LIMITS).unwrap_err();
        assert!(matches!(err, ExportError::InvalidInput(_)));
        assert!(err.to_string().contains("exceeds the maximum of 100000000 pixels"));

        // Exactly at the cap is fine
        assert!(OutputSpec::from_dimensions(10_000.0, 10_000.0, &LIMITS).is_ok());
    }

    #[test]
    fn test_unbounded_limits() {
        let spec = OutputSpec::from_dimensions(50_000.0, 50_000.0, &OutputLimits::UNBOUNDED).unwrap();
        assert_eq!((spec.width, spec.height), (50_000, 50_000));
    }
}
