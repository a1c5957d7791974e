use css_filter::FilterSpec;
use std::sync::Arc;

use crate::error::ExportError;
use crate::models::{AppConfig, OutputSpec};
use crate::rendering::{DataUri, ExportPipeline, ExportResult, UiPlacement};

/// Filter-only export input
#[derive(Debug, Clone)]
pub struct FilterExport {
    pub image_data: String,
    pub filter: FilterSpec,
}

/// Canvas-composite export input
#[derive(Debug, Clone)]
pub struct PrintExport {
    pub image_data: String,
    pub filter: FilterSpec,
    pub output: OutputSpec,
    pub placement: UiPlacement,
}

/// Async front for the export pipeline.
///
/// Data URI decoding and all image work run under `spawn_blocking` so large
/// designs never stall the async runtime.
pub struct ExportService {
    pipeline: Arc<ExportPipeline>,
}

impl ExportService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            pipeline: Arc::new(ExportPipeline::new(config)),
        }
    }

    pub async fn export_filtered(&self, request: FilterExport) -> Result<ExportResult, ExportError> {
        self.run_blocking(move |pipeline| {
            let source = DataUri::parse(&request.image_data)?;
            pipeline.filtered(&source, &request.filter)
        })
        .await
    }

    pub async fn export_print(&self, request: PrintExport) -> Result<ExportResult, ExportError> {
        self.run_blocking(move |pipeline| {
            let source = DataUri::parse(&request.image_data)?;
            pipeline.print(
                &source,
                &request.filter,
                &request.output,
                &request.placement,
            )
        })
        .await
    }

    /// Execute CPU-intensive export work in a blocking context
    async fn run_blocking<F>(&self, job: F) -> Result<ExportResult, ExportError>
    where
        F: FnOnce(&ExportPipeline) -> Result<ExportResult, ExportError> + Send + 'static,
    {
        let pipeline = self.pipeline.clone();

        tokio::task::spawn_blocking(move || job(&pipeline))
            .await
            .map_err(|e| ExportError::Processing(format!("Export task failed: {e}")))?
    }
}
