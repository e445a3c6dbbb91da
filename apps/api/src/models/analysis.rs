use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::suggestions::{SuggestionMode, SuggestionSource};
use crate::errors::AppError;
use crate::llm_client::LlmErrorKind;

/// Where the resume text comes from.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    /// Raw uploaded PDF bytes; extracted inside the pipeline.
    Pdf(Bytes),
    /// Already-extracted plain text.
    Text(String),
}

/// Everything one analysis run needs. Built per request and passed explicitly
/// into the pipeline; nothing about a run lives outside this value.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub resume: ResumeSource,
    pub job_description: String,
    pub mode: SuggestionMode,
}

impl AnalysisInput {
    /// Validates presence of every input, naming the first one that is missing.
    pub fn new(
        resume: Option<ResumeSource>,
        job_description: Option<String>,
        use_ai: Option<bool>,
    ) -> Result<Self, AppError> {
        let resume = match resume {
            None => {
                return Err(AppError::Validation(
                    "A resume is required: upload a PDF file".to_string(),
                ))
            }
            Some(ResumeSource::Pdf(bytes)) if bytes.is_empty() => {
                return Err(AppError::Validation(
                    "The uploaded resume file is empty".to_string(),
                ))
            }
            Some(ResumeSource::Text(text)) if text.trim().is_empty() => {
                return Err(AppError::Validation(
                    "resume_text cannot be empty".to_string(),
                ))
            }
            Some(source) => source,
        };

        let job_description = job_description
            .map(|jd| jd.trim().to_string())
            .filter(|jd| !jd.is_empty())
            .ok_or_else(|| {
                AppError::Validation("A job description is required: paste its text".to_string())
            })?;

        Ok(Self {
            resume,
            job_description,
            mode: use_ai
                .map(SuggestionMode::from_toggle)
                .unwrap_or_default(),
        })
    }
}

/// Transient result of one analysis run. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    /// 0–100, two decimals.
    pub match_score: f64,
    /// Progress-bar fill, `min(1, similarity)`.
    pub progress: f32,
    pub matched_skills: Vec<String>,
    /// At most ten, sorted.
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub suggestion_mode: SuggestionMode,
    pub suggestion_source: SuggestionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_error: Option<LlmErrorKind>,
    pub resume_word_count: usize,
    pub warnings: Vec<String>,
}
