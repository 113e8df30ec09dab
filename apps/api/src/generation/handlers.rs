//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::form::ResumeFormData;
use crate::generation::prompts::{construct_prompt, RESUME_WRITER_SYSTEM};
use crate::generation::templates::{starter_templates, ResumeTemplate};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(alias = "formData")]
    pub form_data: Option<ResumeFormData>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<ResumeTemplate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: starter_templates(),
    })
}

/// POST /api/v1/resumes/generate
///
/// Validates the form, builds the prompt and asks the configured writer for the
/// resume text. Every log line for the request carries its `request_id`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request_id = Uuid::new_v4();
    generate(state, request, request_id)
        .instrument(info_span!("generate_resume", %request_id))
        .await
}

async fn generate(
    state: AppState,
    request: GenerateRequest,
    request_id: Uuid,
) -> Result<Json<GenerateResponse>, AppError> {
    info!("Processing resume generation request");

    let form = request.form_data.ok_or_else(|| {
        error!("Missing form data");
        AppError::Validation("Missing form data".to_string())
    })?;
    if let Err(e) = form.validate() {
        error!(
            has_name = !form.name.trim().is_empty(),
            has_email = !form.email.trim().is_empty(),
            has_experience = !form.experience.trim().is_empty(),
            "Missing required fields"
        );
        return Err(e);
    }

    let writer = state.writer.as_ref().ok_or_else(|| {
        error!("No API key configured for the resume writer");
        AppError::Configuration("Server configuration error: Missing API key".to_string())
    })?;

    let prompt = construct_prompt(&form);
    info!(prompt_chars = prompt.len(), "Prompt constructed, calling writer");

    let content = writer
        .write_resume(&prompt, RESUME_WRITER_SYSTEM)
        .await
        .map_err(|e| {
            error!(error = %e, "Resume generation failed");
            AppError::from(e)
        })?;

    info!(content_chars = content.len(), "Resume successfully generated");
    Ok(Json(GenerateResponse {
        content,
        request_id,
        generated_at: Utc::now(),
    }))
}
