//! Suggestion Engine — two interchangeable strategies behind one trait.
//!
//! `RuleBasedSuggester` runs a fixed checklist with no I/O.
//! `RemoteSuggester` asks the local model and falls back to a single placeholder.

pub mod remote;
pub mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm_client::LlmErrorKind;

pub use remote::{RemoteSuggester, REMOTE_FAILURE_PLACEHOLDER};
pub use rules::RuleBasedSuggester;

/// Selected by the "use AI-generated suggestions" toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    Rules,
    #[default]
    Remote,
}

impl SuggestionMode {
    pub fn from_toggle(use_ai: bool) -> Self {
        if use_ai {
            SuggestionMode::Remote
        } else {
            SuggestionMode::Rules
        }
    }
}

/// Where the returned suggestions actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Rules,
    Remote,
    RemoteFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub items: Vec<String>,
    pub source: SuggestionSource,
    /// Only set for `RemoteFallback`.
    pub error: Option<LlmErrorKind>,
}

#[async_trait]
pub trait SuggestionStrategy: Send + Sync {
    async fn suggest(&self, resume_text: &str, job_description: &str) -> Suggestions;
}

/// Both strategies, chosen per request by `SuggestionMode`.
#[derive(Clone)]
pub struct Suggesters {
    pub rules: Arc<dyn SuggestionStrategy>,
    pub remote: Arc<dyn SuggestionStrategy>,
}

impl Suggesters {
    pub fn for_mode(&self, mode: SuggestionMode) -> &dyn SuggestionStrategy {
        match mode {
            SuggestionMode::Rules => self.rules.as_ref(),
            SuggestionMode::Remote => self.remote.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_maps_to_mode() {
        assert_eq!(SuggestionMode::from_toggle(true), SuggestionMode::Remote);
        assert_eq!(SuggestionMode::from_toggle(false), SuggestionMode::Rules);
    }

    #[test]
    fn test_default_mode_is_remote() {
        assert_eq!(SuggestionMode::default(), SuggestionMode::Remote);
    }

    #[test]
    fn test_source_serializes_snake_case() {
        let json = serde_json::to_string(&SuggestionSource::RemoteFallback).unwrap();
        assert_eq!(json, r#""remote_fallback""#);
    }
}
