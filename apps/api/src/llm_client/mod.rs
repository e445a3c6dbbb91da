/// LLM Client — the single point of entry for every call to the local inference server.
///
/// ARCHITECTURAL RULE: No other module may talk to Ollama directly.
/// Text generation and embeddings both go through `LlmClient`.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

const GENERATE_PATH: &str = "/api/generate";
const EMBED_PATH: &str = "/api/embed";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Serializable tag for an `LlmError`, reported to callers without the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmErrorKind {
    Network,
    Api,
    Parse,
    Empty,
}

impl LlmError {
    pub fn kind(&self) -> LlmErrorKind {
        match self {
            LlmError::Network(_) => LlmErrorKind::Network,
            LlmError::Api { .. } => LlmErrorKind::Api,
            LlmError::Parse(_) => LlmErrorKind::Parse,
            LlmError::EmptyContent => LlmErrorKind::Empty,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Thin client over the Ollama HTTP API.
/// Every request is bounded by the configured timeout; there are no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    generation_model: String,
    embedding_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.inference_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            generation_model: config.suggestion_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    pub fn generation_model(&self) -> &str {
        &self.generation_model
    }

    /// Sends a single non-streaming prompt and returns the model's raw `response` text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model: &self.generation_model,
            prompt,
            stream: false,
        };

        let raw = self.post(GENERATE_PATH, &body).await?;
        let parsed: GenerateResponse = serde_json::from_str(&raw)?;

        if parsed.response.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            "Generation succeeded: model={}, chars={}",
            self.generation_model,
            parsed.response.len()
        );
        Ok(parsed.response)
    }

    /// Embeds every input in one request. The result has one vector per input, in order.
    pub async fn embed(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, LlmError> {
        let body = EmbedRequest {
            model: &self.embedding_model,
            input: inputs,
        };

        let raw = self.post(EMBED_PATH, &body).await?;
        let parsed: EmbedResponse = serde_json::from_str(&raw)?;

        if parsed.embeddings.len() != inputs.len() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            "Embedding succeeded: model={}, inputs={}, dims={}",
            self.embedding_model,
            inputs.len(),
            parsed.embeddings.first().map(Vec::len).unwrap_or(0)
        );
        Ok(parsed.embeddings)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaError>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(url: &str) -> LlmClient {
        let config = Config {
            ollama_url: url.to_string(),
            inference_timeout_secs: 2,
            ..Config::default()
        };
        LlmClient::new(&config).unwrap()
    }

    #[test]
    fn test_generate_request_wire_format() {
        let body = GenerateRequest {
            model: "mistral",
            prompt: "hello",
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "mistral");
        assert_eq!(value["prompt"], "hello");
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn test_generate_response_without_field_defaults_to_empty() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(parsed.response.is_empty());
    }

    #[test]
    fn test_error_kind_tags() {
        let parse_err = serde_json::from_str::<GenerateResponse>("not json").unwrap_err();
        assert_eq!(LlmError::from(parse_err).kind(), LlmErrorKind::Parse);
        assert_eq!(LlmError::EmptyContent.kind(), LlmErrorKind::Empty);
        let api = LlmError::Api {
            status: 404,
            message: "model 'mistral' not found".into(),
        };
        assert_eq!(api.kind(), LlmErrorKind::Api);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:11434/");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        // Port 9 (discard) is closed on test hosts; the connect fails immediately.
        let client = client_for("http://127.0.0.1:9");
        let err = client.generate("anything").await.unwrap_err();
        assert_eq!(err.kind(), LlmErrorKind::Network);
    }
}
