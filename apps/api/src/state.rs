use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analysis::entities::{DictionaryEntityExtractor, EntityExtractor};
use crate::analysis::similarity::{Embedder, OllamaEmbedder};
use crate::analysis::suggestions::{RemoteSuggester, RuleBasedSuggester, Suggesters};
use crate::config::Config;
use crate::extraction::PdfExtractor;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing here changes between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pdf: PdfExtractor,
    /// Pluggable embedder. Default: Ollama `/api/embed`.
    pub embedder: Arc<dyn Embedder>,
    /// Pluggable entity extractor. Default: skill lexicon.
    pub entity_extractor: Arc<dyn EntityExtractor>,
    pub suggesters: Suggesters,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let llm = LlmClient::new(&config).context("Failed to build HTTP client")?;

        Ok(Self {
            pdf: PdfExtractor::new(),
            embedder: Arc::new(OllamaEmbedder(llm.clone())),
            entity_extractor: Arc::new(DictionaryEntityExtractor::with_extra_skills(
                &config.extra_skills,
            )),
            suggesters: Suggesters {
                rules: Arc::new(RuleBasedSuggester),
                remote: Arc::new(RemoteSuggester::new(llm)),
            },
            config,
        })
    }
}
