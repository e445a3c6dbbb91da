use async_trait::async_trait;
use tracing::warn;

use crate::analysis::suggestions::{SuggestionSource, SuggestionStrategy, Suggestions};
use crate::llm_client::prompts::build_suggestion_prompt;
use crate::llm_client::{LlmClient, LlmError};

/// The single suggestion returned whenever the model cannot be reached or understood.
pub const REMOTE_FAILURE_PLACEHOLDER: &str =
    "⚠️ Could not fetch AI suggestions. Is Ollama running?";

/// Characters stripped from both ends of each suggestion line.
const BULLET_DECORATION: &[char] = &['-', '•', '*', ' ', '\t', '\r'];

/// Asks the local model for suggestions.
pub struct RemoteSuggester {
    llm: LlmClient,
}

impl RemoteSuggester {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Raw call without the fallback. Errors stay tagged.
    pub async fn fetch(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<Vec<String>, LlmError> {
        let prompt = build_suggestion_prompt(resume_text, job_description);
        let output = self.llm.generate(&prompt).await?;

        let suggestions = parse_suggestion_lines(&output);
        if suggestions.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(suggestions)
    }
}

#[async_trait]
impl SuggestionStrategy for RemoteSuggester {
    async fn suggest(&self, resume_text: &str, job_description: &str) -> Suggestions {
        match self.fetch(resume_text, job_description).await {
            Ok(items) => Suggestions {
                items,
                source: SuggestionSource::Remote,
                error: None,
            },
            Err(e) => {
                warn!(
                    "Remote suggestions failed (model: {}): {e}",
                    self.llm.generation_model()
                );
                fallback(&e)
            }
        }
    }
}

fn fallback(err: &LlmError) -> Suggestions {
    Suggestions {
        items: vec![REMOTE_FAILURE_PLACEHOLDER.to_string()],
        source: SuggestionSource::RemoteFallback,
        error: Some(err.kind()),
    }
}

/// Splits model output into one suggestion per non-blank line, minus bullet decoration.
pub fn parse_suggestion_lines(output: &str) -> Vec<String> {
    output
        .split('\n')
        .map(|line| line.trim_matches(BULLET_DECORATION))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
