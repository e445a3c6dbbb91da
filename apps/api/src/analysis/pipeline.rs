//! Analysis pipeline: extract → score → extract entities → match skills → suggest.
//!
//! One call is one run. Everything it needs arrives in `AnalysisInput`; the result
//! is returned to the caller and nothing is kept.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::similarity::score_similarity;
use crate::analysis::skills::match_skills;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisInput, AnalysisResult, ResumeSource};
use crate::state::AppState;

pub async fn run_analysis(
    state: &AppState,
    input: AnalysisInput,
) -> Result<AnalysisResult, AppError> {
    let analysis_id = Uuid::new_v4();
    let AnalysisInput {
        resume,
        job_description,
        mode,
    } = input;

    info!("Analysis {analysis_id} started (suggestion mode: {mode:?})");

    let resume_text = match resume {
        ResumeSource::Pdf(bytes) => state.pdf.extract_text(bytes).await?,
        ResumeSource::Text(text) => text.trim().to_string(),
    };
    let resume_word_count = resume_text.split_whitespace().count();
    debug!("Analysis {analysis_id}: resume has {resume_word_count} words");

    let score = score_similarity(state.embedder.as_ref(), &resume_text, &job_description)
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    let entities = state.entity_extractor.extract(&resume_text);
    let skills = match_skills(&job_description, &entities);

    let suggestions = state
        .suggesters
        .for_mode(mode)
        .suggest(&resume_text, &job_description)
        .await;

    let warnings: Vec<String> = score.warning.into_iter().collect();

    info!(
        "Analysis {analysis_id} finished: score={}%, matched={}, missing={}, suggestions={} ({:?})",
        score.percent,
        skills.matched.len(),
        skills.missing.len(),
        suggestions.items.len(),
        suggestions.source
    );

    Ok(AnalysisResult {
        analysis_id,
        analyzed_at: Utc::now(),
        match_score: score.percent,
        progress: score.similarity.min(1.0),
        matched_skills: skills.matched,
        missing_skills: skills.missing,
        suggestions: suggestions.items,
        suggestion_mode: mode,
        suggestion_source: suggestions.source,
        suggestion_error: suggestions.error,
        resume_word_count,
        warnings,
    })
}
