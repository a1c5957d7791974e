//! Content-based image format detection.

/// How many leading bytes are searched for SVG markers
const SVG_SNIFF_WINDOW: usize = 1024;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encoded image format, decided from the payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Svg,
    Unknown,
}

impl ImageFormat {
    /// Classify a payload by its byte signature.
    ///
    /// Binary signatures are checked first, then the start of the payload is
    /// searched for XML/SVG markers. The declared MIME type plays no part.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(PNG_SIGNATURE) {
            return ImageFormat::Png;
        }
        if bytes.starts_with(JPEG_SIGNATURE) {
            return ImageFormat::Jpeg;
        }
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return ImageFormat::WebP;
        }
        if looks_like_svg(bytes) {
            return ImageFormat::Svg;
        }
        ImageFormat::Unknown
    }

    /// Map a declared MIME type to a format. Only used when sniffing is inconclusive.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => ImageFormat::Png,
            "image/jpeg" | "image/jpg" | "image/pjpeg" => ImageFormat::Jpeg,
            "image/webp" => ImageFormat::WebP,
            "image/svg+xml" | "image/svg" => ImageFormat::Svg,
            _ => ImageFormat::Unknown,
        }
    }

    /// Sniffed format, falling back to the declared MIME type when the bytes
    /// carry no recognizable signature.
    pub fn detect(bytes: &[u8], declared_mime: &str) -> Self {
        match Self::sniff(bytes) {
            ImageFormat::Unknown => Self::from_mime(declared_mime),
            sniffed => sniffed,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Unknown => "application/octet-stream",
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ImageFormat::Svg)
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_WINDOW)];
    let head = head.strip_prefix(UTF8_BOM).unwrap_or(head);
    let text = String::from_utf8_lossy(head).to_ascii_lowercase();
    let text = text.trim_start();

    text.starts_with("<?xml") || text.starts_with("<svg") || text.contains("<svg")
}
