use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default so the service starts against a stock local Ollama.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the local inference server (no trailing slash).
    pub ollama_url: String,
    pub suggestion_model: String,
    pub embedding_model: String,
    pub inference_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// Site-specific skill terms added to the built-in lexicon.
    pub extra_skills: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ollama_url: std::env::var("OLLAMA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            suggestion_model: std::env::var("SUGGESTION_MODEL")
                .unwrap_or_else(|_| "mistral".to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            inference_timeout_secs: parse_env("INFERENCE_TIMEOUT_SECS", 60)
                .context("INFERENCE_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            extra_skills: std::env::var("EXTRA_SKILLS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            suggestion_model: "mistral".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            inference_timeout_secs: 60,
            max_upload_bytes: 10 * 1024 * 1024,
            extra_skills: Vec::new(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list, entries trimmed, blanks dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
