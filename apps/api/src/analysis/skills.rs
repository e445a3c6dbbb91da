//! Skill Matcher — set overlap between job-description tokens and resume skill terms.
//!
//! Tokens are bag-of-words (lowercased, ≥4 word characters), not normalized skill
//! names: multi-word skills and short acronyms never appear in the token set.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::entities::{Entities, SKILL};

/// Maximum number of missing skills reported.
pub const MISSING_SKILLS_LIMIT: usize = 10;

static JD_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w{4,}\b").expect("token pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// JD tokens found among the resume's skills, sorted.
    pub matched: Vec<String>,
    /// JD tokens not found, sorted, first `MISSING_SKILLS_LIMIT` only.
    pub missing: Vec<String>,
}

/// Lowercased ≥4-character word tokens of the job description.
pub fn job_tokens(job_description: &str) -> BTreeSet<String> {
    let lower = job_description.to_lowercase();
    JD_TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lowercased `SKILL` entities.
pub fn resume_skills(entities: &Entities) -> BTreeSet<String> {
    entities
        .get(SKILL)
        .map(|skills| skills.iter().map(|s| s.to_lowercase()).collect())
        .unwrap_or_default()
}

pub fn match_skills(job_description: &str, entities: &Entities) -> SkillMatch {
    let tokens = job_tokens(job_description);
    let skills = resume_skills(entities);

    // BTreeSet iteration is already lexicographic.
    let matched: Vec<String> = tokens.intersection(&skills).cloned().collect();
    let missing: Vec<String> = tokens
        .difference(&skills)
        .take(MISSING_SKILLS_LIMIT)
        .cloned()
        .collect();

    SkillMatch { matched, missing }
}
