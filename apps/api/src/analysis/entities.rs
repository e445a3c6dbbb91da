//! Entity extraction — pluggable, trait-based extractor that maps raw text to
//! categorised entity strings (`"SKILL"` → ["python", "docker", …]).
//!
//! Default: `DictionaryEntityExtractor` (lexicon lookup over 1–3 word windows).
//! `AppState` holds an `Arc<dyn EntityExtractor>` so a model-backed NER can be
//! swapped in without touching the pipeline.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Category key for skill entities.
pub const SKILL: &str = "SKILL";

/// Category → extracted strings, in first-seen order.
pub type Entities = HashMap<String, Vec<String>>;

pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Entities;
}

/// Longest lexicon phrase, in words.
const MAX_PHRASE_WORDS: usize = 3;

/// Words may carry `+`, `#`, `.` and `-` so that `c++`, `c#`, `node.js` and
/// `ci-cd` survive tokenization.
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9][A-Za-z0-9+#.\-]*").expect("word pattern is valid")
});

static SKILL_LEXICON: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // languages
        "python", "java", "javascript", "typescript", "rust", "golang", "ruby",
        "php", "swift", "kotlin", "scala", "c++", "c#", "matlab", "perl",
        "haskell", "elixir", "clojure", "dart", "lua", "bash", "shell", "powershell",
        "sql", "html", "css", "graphql",
        // frameworks and libraries
        "react", "angular", "vue", "svelte", "next.js", "node.js", "nodejs", "express",
        "django", "flask", "fastapi", "spring", "spring boot", "rails", "ruby on rails",
        "laravel", ".net", "asp.net", "tensorflow", "pytorch", "keras", "scikit-learn",
        "pandas", "numpy", "spark", "hadoop", "kafka", "rabbitmq", "celery", "airflow",
        "tokio", "actix", "axum", "redux", "tailwind", "bootstrap", "jquery",
        // data stores
        "mysql", "postgresql", "postgres", "mongodb", "redis", "cassandra", "dynamodb",
        "sqlite", "oracle", "elasticsearch", "snowflake", "bigquery", "neo4j",
        // platforms and tools
        "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "terraform",
        "ansible", "jenkins", "github actions", "gitlab", "github", "git", "linux",
        "nginx", "grafana", "prometheus", "datadog", "splunk", "jira", "figma",
        "postman", "webpack", "vite", "jest", "cypress", "selenium", "playwright",
        // practices and domains
        "api", "apis", "rest", "restful", "microservices", "ci-cd", "devops", "agile",
        "scrum", "testing", "automation", "security", "networking", "cloud",
        "machine learning", "deep learning", "data analysis", "data science",
        "data engineering", "nlp", "computer vision", "statistics", "analytics",
        "excel", "tableau", "power bi", "etl", "backend", "frontend", "full stack",
        "mobile", "android", "ios", "blockchain", "embedded",
        // soft skills
        "leadership", "communication", "teamwork", "mentoring", "collaboration",
        "problem solving", "project management", "stakeholder management",
    ]
    .into_iter()
    .collect()
});

/// Lexicon-based skill extractor.
///
/// Every 1..=3 word window of the lowercased text is looked up in the lexicon;
/// each hit is reported once, in the order it first appears.
#[derive(Debug, Default, Clone)]
pub struct DictionaryEntityExtractor {
    extra_skills: HashSet<String>,
}

impl DictionaryEntityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the built-in lexicon with site-specific terms (matched case-insensitively).
    pub fn with_extra_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra_skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { extra_skills }
    }

    fn is_skill(&self, phrase: &str) -> bool {
        SKILL_LEXICON.contains(phrase) || self.extra_skills.contains(phrase)
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = WORD_RE
            .find_iter(&lower)
            .map(|m| trim_trailing_punctuation(m.as_str()))
            .filter(|w| !w.is_empty())
            .collect();

        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for start in 0..words.len() {
            for len in (1..=MAX_PHRASE_WORDS).rev() {
                if start + len > words.len() {
                    continue;
                }
                let phrase = words[start..start + len].join(" ");
                if self.is_skill(&phrase) && seen.insert(phrase.clone()) {
                    skills.push(phrase);
                }
            }
        }

        skills
    }
}

impl EntityExtractor for DictionaryEntityExtractor {
    fn extract(&self, text: &str) -> Entities {
        let mut entities = Entities::new();
        let skills = self.extract_skills(text);
        if !skills.is_empty() {
            entities.insert(SKILL.to_string(), skills);
        }
        entities
    }
}

/// Drops sentence punctuation (`python.` → `python`) while keeping `c++` and `c#`.
fn trim_trailing_punctuation(word: &str) -> &str {
    word.trim_end_matches(&['.', '-'][..])
}
