//! Axum route handlers for the preview and export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::export::{export_html, export_pdf, export_plain_text, print_document, ExportArtifact};
use crate::render::preview::{render_preview_nodes, RenderNode, Theme};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub text: String,
    /// Set by the caller for restricted-tier users.
    #[serde(default)]
    pub watermark: bool,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub text: String,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub theme: Theme,
    pub surface_class: &'static str,
    pub nodes: Vec<RenderNode>,
}

impl IntoResponse for ExportArtifact {
    fn into_response(self) -> Response {
        let headers = [
            (header::CONTENT_TYPE, self.content_type().to_string()),
            (header::CONTENT_DISPOSITION, self.content_disposition()),
        ];
        (headers, self.bytes).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/render/preview
///
/// One themed node per input line, plus the theme's surface class.
pub async fn handle_preview(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let nodes = render_preview_nodes(&request.text, request.theme);
    Json(PreviewResponse {
        theme: request.theme,
        surface_class: request.theme.palette().surface_class,
        nodes,
    })
}

/// POST /api/v1/export/text
pub async fn handle_export_text(Json(request): Json<ExportRequest>) -> ExportArtifact {
    export_plain_text(&request.text)
}

/// POST /api/v1/export/html
pub async fn handle_export_html(Json(request): Json<ExportRequest>) -> ExportArtifact {
    info!(watermark = request.watermark, "Exporting HTML");
    export_html(&request.text, request.watermark)
}

/// POST /api/v1/export/pdf
///
/// Layout and encoding run on the blocking pool.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<ExportArtifact, AppError> {
    info!(watermark = request.watermark, "Exporting PDF");
    let geometry = state.page_geometry;
    let artifact = tokio::task::spawn_blocking(move || {
        export_pdf(&request.text, request.watermark, geometry)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF export task failed: {e}")))?
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF export failed: {e}")))?;
    Ok(artifact)
}

/// POST /api/v1/export/print
///
/// Returns the print document inline; opening it starts the platform print flow.
pub async fn handle_print(Json(request): Json<ExportRequest>) -> ExportArtifact {
    info!(watermark = request.watermark, "Preparing print document");
    print_document(&request.text, request.watermark)
}
