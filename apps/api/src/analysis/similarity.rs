//! Similarity Scorer — cosine similarity between resume and job description embeddings.
//!
//! Embeddings come from an `Embedder`; `AppState` carries an `Arc<dyn Embedder>`
//! so tests and alternative models can stand in for the Ollama-backed default.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm_client::{LlmClient, LlmError};

/// Warning attached when a score could not be computed from text.
pub const EMPTY_TEXT_WARNING: &str =
    "No text could be extracted from the resume, so the match score is 0. \
     Scanned or image-only PDFs are not supported.";

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Returns one vector per input, in input order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, LlmError>;
}

/// Default embedder backed by the local inference server.
pub struct OllamaEmbedder(pub LlmClient);

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, LlmError> {
        self.0.embed(texts).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Cosine similarity clamped to [0, 1].
    pub similarity: f32,
    /// `similarity` as a percentage rounded to two decimals.
    pub percent: f64,
    /// Set when the score was not derived from the embedding model.
    pub warning: Option<String>,
}

impl MatchScore {
    fn from_similarity(similarity: f32) -> Self {
        let similarity = if similarity.is_finite() {
            similarity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            similarity,
            percent: to_percent(similarity),
            warning: None,
        }
    }

    fn empty_text() -> Self {
        Self {
            similarity: 0.0,
            percent: 0.0,
            warning: Some(EMPTY_TEXT_WARNING.to_string()),
        }
    }
}

/// Scores `resume_text` against `job_description`.
///
/// Empty (whitespace-only) input short-circuits to a zero score with a warning;
/// the embedder is not called.
pub async fn score_similarity(
    embedder: &dyn Embedder,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchScore, LlmError> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return Ok(MatchScore::empty_text());
    }

    let vectors = embedder.embed(&[resume_text, job_description]).await?;
    let (resume_vec, jd_vec) = match vectors.as_slice() {
        [a, b] => (a, b),
        _ => return Err(LlmError::EmptyContent),
    };

    Ok(MatchScore::from_similarity(cosine_similarity(
        resume_vec, jd_vec,
    )))
}

/// Cosine similarity of two vectors. Mismatched lengths and zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0_f64, 0.0_f64, 0.0_f64), |(dot, na, nb), (&x, &y)| {
            let (x, y) = (x as f64, y as f64);
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

fn to_percent(similarity: f32) -> f64 {
    (similarity as f64 * 100.0 * 100.0).round() / 100.0
}
