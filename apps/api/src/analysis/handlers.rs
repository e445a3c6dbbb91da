//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::run_analysis;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisInput, AnalysisResult, ResumeSource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
    pub use_ai: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
    pub word_count: usize,
}

/// Fields collected from an analyze form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<Bytes>,
    job_description: Option<String>,
    use_ai: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (PDF file), `job_description` (text), `use_ai` (optional toggle).
/// Runs the full pipeline and returns the analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = read_analyze_form(multipart).await?;
    let input = AnalysisInput::new(
        form.resume.map(ResumeSource::Pdf),
        form.job_description,
        form.use_ai,
    )?;

    let result = run_analysis(&state, input).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/text
///
/// Same pipeline for callers that already hold the resume as plain text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = AnalysisInput::new(
        request.resume_text.map(ResumeSource::Text),
        request.job_description,
        request.use_ai,
    )?;

    let result = run_analysis(&state, input).await?;
    Ok(Json(result))
}

/// POST /api/v1/extract
///
/// Multipart form with a `resume` PDF. Returns the extracted text only.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let form = read_analyze_form(multipart).await?;
    let resume = form.resume.ok_or_else(|| {
        AppError::Validation("A resume is required: upload a PDF file".to_string())
    })?;

    let text = state.pdf.extract_text(resume).await?;
    let word_count = text.split_whitespace().count();
    Ok(Json(ExtractResponse { text, word_count }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => form.resume = Some(field.bytes().await.map_err(malformed)?),
            "job_description" => form.job_description = Some(read_text(field).await?),
            "use_ai" => form.use_ai = Some(parse_toggle(&read_text(field).await?)?),
            other => tracing::debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(malformed)
}

fn malformed(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed upload: {}", err.body_text()))
}

/// Accepts the values HTML checkboxes and humans tend to send.
fn parse_toggle(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        other => Err(AppError::Validation(format!(
            "use_ai must be true or false, got '{other}'"
        ))),
    }
}
