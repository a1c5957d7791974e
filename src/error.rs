use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned when a data URI carries no decodable bytes.
pub const EMPTY_IMAGE_MESSAGE: &str = "Image data is empty or corrupted.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Failures of the export pipeline, grouped by who is at fault.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Caller sent something unusable: missing field, malformed data URI,
    /// bad dimensions or placement.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unsupported image format ({mime}): {reason}")]
    UnsupportedFormat { mime: String, reason: String },

    /// Failure after input validation passed (filter, resize, encode, task join).
    #[error("Processing failed: {0}")]
    Processing(String),
}

impl ExportError {
    pub fn empty_image() -> Self {
        ExportError::InvalidInput(EMPTY_IMAGE_MESSAGE.to_string())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExportError::InvalidInput(_) | ExportError::UnsupportedFormat { .. }
        )
    }
}

impl From<css_filter::FilterError> for ExportError {
    fn from(e: css_filter::FilterError) -> Self {
        ExportError::Processing(format!("filter: {e}"))
    }
}

impl From<png::EncodingError> for ExportError {
    fn from(e: png::EncodingError) -> Self {
        ExportError::Processing(format!("PNG encode: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Export(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Export request failed");
        } else {
            tracing::debug!(error = %self, "Export request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
