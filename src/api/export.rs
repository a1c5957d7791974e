use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, OutputSpec};
use crate::rendering::UiPlacement;
use crate::services::{ExportService, FilterExport, PrintExport};

/// Design offset from the preview center, in percent of the preview side
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Request body for both export endpoints
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Design as a base64 data URI (`data:<mime>;base64,...`)
    pub image_data: Option<String>,
    /// CSS-like filter descriptor, e.g. `brightness(1.05) contrast(1.1)`
    pub filter: Option<String>,
    /// Output canvas width in pixels (print export only)
    pub product_width: Option<f64>,
    /// Output canvas height in pixels (print export only)
    pub product_height: Option<f64>,
    /// Design scale in percent (default 100)
    pub scale: Option<f64>,
    /// Offset from center (default 0, 0)
    pub position: Option<Position>,
}

/// Successful export
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    /// `data:image/png;base64,...`
    pub exported_image: String,
    /// Present for the print export only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ExportDimensions>,
}

/// Pixel size and declared resolution of a print export
#[derive(Debug, Serialize, ToSchema)]
pub struct ExportDimensions {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

/// Error body returned for 4xx and 5xx responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ExportErrorResponse {
    pub status: u16,
    pub error: String,
}

impl ExportRequest {
    fn image_data(&mut self) -> Result<String, ApiError> {
        self.image_data
            .take()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidInput("imageData is required".to_string()))
    }

    fn filter_spec(&self) -> css_filter::FilterSpec {
        css_filter::parse(self.filter.as_deref().unwrap_or("none"))
    }

    fn placement(&self) -> Result<UiPlacement, ApiError> {
        let position = self.position.unwrap_or_default();
        Ok(UiPlacement::new(
            position.x,
            position.y,
            self.scale.unwrap_or(100.0),
        )?)
    }
}

/// Turn axum's JSON rejection (422 for type errors) into a 400 with our error body.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        ApiError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    })
}

/// Export a filtered design
///
/// Decodes the design, applies the filter and returns it as a PNG at its
/// normalized size. Placement fields are ignored.
#[utoipa::path(
    post,
    path = "/api/export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Filtered PNG as data URI", body = ExportResponse),
        (status = 400, description = "Invalid input or unsupported format", body = ExportErrorResponse),
        (status = 500, description = "Processing error", body = ExportErrorResponse),
    ),
    tag = "Export"
)]
pub async fn handle_export(
    State(service): State<Arc<ExportService>>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let mut request = json_body(payload)?;
    let image_data = request.image_data()?;
    let filter = request.filter_spec();

    tracing::info!(
        payload_bytes = image_data.len(),
        filter = request.filter.as_deref().unwrap_or("none"),
        "Export request received"
    );

    let result = service
        .export_filtered(FilterExport { image_data, filter })
        .await?;

    Ok(Json(ExportResponse {
        success: true,
        exported_image: result.to_data_uri(),
        dimensions: None,
    }))
}

/// Export a print-ready canvas
///
/// Places the filtered design on a transparent canvas of the product's
/// print size, exactly where the editor preview showed it, and returns a
/// PNG tagged at 300 DPI.
#[utoipa::path(
    post,
    path = "/api/export/print",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Composited PNG as data URI", body = ExportResponse),
        (status = 400, description = "Invalid input or unsupported format", body = ExportErrorResponse),
        (status = 500, description = "Processing error", body = ExportErrorResponse),
    ),
    tag = "Export"
)]
pub async fn handle_print_export(
    State(config): State<Arc<AppConfig>>,
    State(service): State<Arc<ExportService>>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let mut request = json_body(payload)?;
    let image_data = request.image_data()?;

    let (Some(width), Some(height)) = (request.product_width, request.product_height) else {
        return Err(ApiError::InvalidInput(
            "productWidth and productHeight are required".to_string(),
        ));
    };
    let output = OutputSpec::from_dimensions(width, height, &config.output_limits())?;
    let placement = request.placement()?;
    let filter = request.filter_spec();

    tracing::info!(
        payload_bytes = image_data.len(),
        width = output.width,
        height = output.height,
        scale = placement.scale_percent,
        x = placement.offset_x,
        y = placement.offset_y,
        "Print export request received"
    );

    let result = service
        .export_print(PrintExport {
            image_data,
            filter,
            output,
            placement,
        })
        .await?;

    Ok(Json(ExportResponse {
        success: true,
        exported_image: result.to_data_uri(),
        dimensions: Some(ExportDimensions {
            width: result.width,
            height: result.height,
            dpi: result.dpi,
        }),
    }))
}
