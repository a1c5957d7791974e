use axum::{extract::rejection::JsonRejection, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::export::{json_body, Position};
use crate::error::ApiError;
use crate::models::{OutputLimits, OutputSpec};
use crate::rendering::{CanvasPlacement, PrintAreaPlacement, UiPlacement};

/// UI placement to convert, with optional sizes for the canvas rectangle
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    /// Design scale in percent
    pub scale: Option<f64>,
    /// Offset from center in percent of the preview side
    pub position: Option<Position>,
    pub product_width: Option<f64>,
    pub product_height: Option<f64>,
    /// Normalized design width in pixels
    pub image_width: Option<u32>,
    /// Normalized design height in pixels
    pub image_height: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResponse {
    /// Normalized placement for marketplace product creation
    pub print_area: PrintAreaPlacement,
    /// Pixel rectangle on the export canvas, when sizes were given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasPlacement>,
}

/// Convert a UI placement
///
/// Returns the marketplace print-area placement and, if product and image
/// sizes are supplied, the pixel rectangle the print export would use.
#[utoipa::path(
    post,
    path = "/api/placement",
    request_body = PlacementRequest,
    responses(
        (status = 200, description = "Converted placement", body = PlacementResponse),
        (status = 400, description = "Invalid placement", body = super::export::ExportErrorResponse),
    ),
    tag = "Placement"
)]
pub async fn handle_placement(
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> Result<Json<PlacementResponse>, ApiError> {
    let request = json_body(payload)?;

    let explicit = request.scale.is_some() || request.position.is_some();
    let ui = if explicit {
        let position = request.position.unwrap_or_default();
        UiPlacement::new(position.x, position.y, request.scale.unwrap_or(100.0))?
    } else {
        UiPlacement::marketplace_default()
    };

    let print_area = if explicit {
        ui.to_print_area()
    } else {
        PrintAreaPlacement::default()
    };

    let canvas = match (
        request.product_width,
        request.product_height,
        request.image_width,
        request.image_height,
    ) {
        (Some(pw), Some(ph), Some(iw), Some(ih)) => {
            let output = OutputSpec::from_dimensions(pw, ph, &OutputLimits::UNBOUNDED)?;
            Some(ui.to_canvas(&output, iw, ih))
        }
        _ => None,
    };

    tracing::debug!(?ui, ?print_area, ?canvas, "Placement converted");

    Ok(Json(PlacementResponse { print_area, canvas }))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn convert(json: &str) -> Result<PlacementResponse, ApiError> {
        let request: PlacementRequest = serde_json::from_str(json).unwrap();
        handle_placement(Ok(Json(request))).await.map(|Json(r)| r)
    }

    #[tokio::test]
    async fn test_default_placement() {
        let response = convert("{}").await.unwrap();
        assert_eq!(response.print_area, PrintAreaPlacement::default());
        assert!(response.canvas.is_none());
    }

    #[tokio::test]
    async fn test_explicit_placement_with_canvas() {
        let response = convert(
            r#"{"scale":50,"position":{"x":20,"y":-10},"productWidth":1000,"productHeight":1000,"imageWidth":100,"imageHeight":100}"#,
        )
        .await
        .unwrap();

        assert!((response.print_area.x - 0.7).abs() < 1e-12);
        assert!((response.print_area.y - 0.4).abs() < 1e-12);

        let canvas = response.canvas.unwrap();
        assert_eq!((canvas.width, canvas.height), (280, 280));
        assert_eq!(canvas.center(), (700.0, 400.0));
    }

    #[tokio::test]
    async fn test_rejects_bad_scale() {
        let err = convert(r#"{"scale":-1}"#).await.unwrap_err();
        assert!(matches!(err, ApiError::Export(_)));
    }
}
