use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::output_spec::OutputLimits;

/// Application configuration loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum accepted request body in bytes (data URIs are large)
    pub max_body_bytes: usize,

    /// Largest accepted product width or height in pixels
    pub max_output_dimension: u32,

    /// Largest accepted product canvas area in pixels
    pub max_output_pixels: u64,

    /// Side of the box SVG input is rasterized into
    pub svg_working_size: u32,

    /// Extra font directory for text inside SVG designs
    pub fonts_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 50 * 1024 * 1024,
            max_output_dimension: 20_000,
            max_output_pixels: 100_000_000,
            svg_working_size: 2048,
            fonts_dir: None,
        }
    }
}

impl AppConfig {
    /// Canvas caps for print exports.
    pub fn output_limits(&self) -> OutputLimits {
        OutputLimits {
            max_dimension: self.max_output_dimension,
            max_pixels: self.max_output_pixels,
        }
    }

    /// Load configuration from a YAML file, or defaults when no file is given.
    ///
    /// A file that cannot be read or parsed is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        max_body_bytes = config.max_body_bytes,
                        max_output_dimension = config.max_output_dimension,
                        max_output_pixels = config.max_output_pixels,
                        svg_working_size = config.svg_working_size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse and sanity-check a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(content)?;
        let defaults = Self::default();
        if config.svg_working_size == 0 {
            tracing::warn!("svg_working_size must be positive, using default");
            config.svg_working_size = defaults.svg_working_size;
        }
        if config.max_output_dimension == 0 {
            tracing::warn!("max_output_dimension must be positive, using default");
            config.max_output_dimension = defaults.max_output_dimension;
        }
        if config.max_output_pixels == 0 {
            tracing::warn!("max_output_pixels must be positive, using default");
            config.max_output_pixels = defaults.max_output_pixels;
        }
        Ok(config)
    }
}
