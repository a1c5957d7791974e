//! `data:<mime>;base64,<payload>` parsing and formatting.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::ExportError;

/// Browsers and canvas APIs are inconsistent about trailing `=`, so accept both.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const FALLBACK_MIME: &str = "application/octet-stream";

/// A decoded data URI: declared MIME type plus raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Declared MIME type, lowercased. Not trusted for format detection.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parse and decode a base64 data URI.
    ///
    /// Remote URLs are rejected outright; the pipeline never fetches anything.
    pub fn parse(input: &str) -> Result<Self, ExportError> {
        let input = input.trim();
        let lower_prefix = input.chars().take(8).collect::<String>().to_ascii_lowercase();

        if lower_prefix.starts_with("http://") || lower_prefix.starts_with("https://") {
            return Err(ExportError::InvalidInput(
                "Remote image URLs are not supported; send the image as a base64 data URI"
                    .to_string(),
            ));
        }
        if !lower_prefix.starts_with("data:") {
            return Err(ExportError::InvalidInput(
                "imageData must be a data URI (data:<mime>;base64,<payload>)".to_string(),
            ));
        }

        let (header, payload) = input[5..].split_once(',').ok_or_else(|| {
            ExportError::InvalidInput("Malformed data URI: missing ',' separator".to_string())
        })?;

        let mut params = header.split(';');
        let mime = params
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MIME)
            .to_ascii_lowercase();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(ExportError::InvalidInput(
                "Only base64-encoded data URIs are supported".to_string(),
            ));
        }

        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(ExportError::empty_image());
        }

        let bytes = PAYLOAD_ENGINE.decode(compact.as_bytes()).map_err(|e| {
            tracing::debug!(%e, mime = %mime, "Base64 payload failed to decode");
            ExportError::empty_image()
        })?;
        if bytes.is_empty() {
            return Err(ExportError::empty_image());
        }

        Ok(Self { mime, bytes })
    }

    /// Format as `data:<mime>;base64,<payload>` with standard padding.
    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        format!("data:{mime};base64,{}", STANDARD.encode(bytes))
    }
}
