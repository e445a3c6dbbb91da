use std::collections::HashSet;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::suggestions::{SuggestionSource, SuggestionStrategy, Suggestions};

/// Resumes shorter than this many words get the "too short" suggestion.
pub const MIN_RESUME_WORDS: usize = 150;

/// (keyword, suggestion) — fires when the JD mentions the keyword and the resume doesn't.
const KEYWORD_RULES: &[(&str, &str)] = &[
    (
        "flask",
        "Mention your experience working with Flask or similar web frameworks.",
    ),
    ("sql", "Include your experience with SQL databases."),
    (
        "api",
        "Describe any projects where you built or worked with APIs.",
    ),
];

const SHORT_RESUME: &str =
    "Your resume seems short. Add more details about your experience, skills, or projects.";

const SECTION_HEADINGS: &[&str] = &["experience", "work", "project"];

const MISSING_SECTION: &str =
    "Consider adding an 'Experience' or 'Projects' section to highlight your background.";

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

/// Deterministic checklist. No external calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedSuggester;

#[async_trait]
impl SuggestionStrategy for RuleBasedSuggester {
    async fn suggest(&self, resume_text: &str, job_description: &str) -> Suggestions {
        Suggestions {
            items: rule_based_suggestions(resume_text, job_description),
            source: SuggestionSource::Rules,
            error: None,
        }
    }
}

/// Runs the checklist in order: keyword gaps, length, section headings.
pub fn rule_based_suggestions(resume_text: &str, job_description: &str) -> Vec<String> {
    let resume_lower = resume_text.to_lowercase();
    let jd_words = job_keywords(job_description);

    let mut suggestions: Vec<String> = KEYWORD_RULES
        .iter()
        .filter(|(keyword, _)| jd_words.contains(*keyword) && !resume_lower.contains(*keyword))
        .map(|(_, suggestion)| suggestion.to_string())
        .collect();

    if resume_text.split_whitespace().count() < MIN_RESUME_WORDS {
        suggestions.push(SHORT_RESUME.to_string());
    }

    if !SECTION_HEADINGS
        .iter()
        .any(|heading| resume_lower.contains(*heading))
    {
        suggestions.push(MISSING_SECTION.to_string());
    }

    suggestions
}

/// Every lowercase word of the JD, any length, so three-letter keywords can match.
fn job_keywords(job_description: &str) -> HashSet<String> {
    let lower = job_description.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_resume(extra: &str) -> String {
        let filler = "delivered reliable software for customers ".repeat(40);
        format!("Experience\n{filler}\n{extra}")
    }

    #[test]
    fn test_sql_gap_fires() {
        let suggestions = rule_based_suggestions(
            &long_resume("Python and Postgres"),
            "Backend role requiring SQL and Python",
        );
        assert!(suggestions.contains(&"Include your experience with SQL databases.".to_string()));
    }

    #[test]
    fn test_sql_gap_silent_when_resume_mentions_it() {
        let suggestions = rule_based_suggestions(
            &long_resume("Wrote MySQL migrations"),
            "Backend role requiring SQL",
        );
        assert!(suggestions.is_empty(), "got {suggestions:?}");
    }

    #[test]
    fn test_long_resume_with_heading_has_no_structure_suggestions() {
        let suggestions = rule_based_suggestions(&long_resume(""), "Office manager");
        assert!(!suggestions.contains(&SHORT_RESUME.to_string()));
        assert!(!suggestions.contains(&MISSING_SECTION.to_string()));
    }

    #[test]
    fn test_short_resume_without_sections() {
        let suggestions = rule_based_suggestions("Jane Doe. Skilled at Rust.", "Rust engineer");
        assert_eq!(suggestions, vec![SHORT_RESUME, MISSING_SECTION]);
    }

    #[test]
    fn test_keyword_rules_keep_checklist_order() {
        let suggestions = rule_based_suggestions(
            &long_resume(""),
            "Build an API in Flask backed by SQL",
        );
        assert_eq!(
            suggestions,
            vec![KEYWORD_RULES[0].1, KEYWORD_RULES[1].1, KEYWORD_RULES[2].1]
        );
    }

    #[test]
    fn test_keyword_must_be_a_whole_jd_word() {
        // "apiary" contains "api" but is not the word "api".
        let suggestions = rule_based_suggestions(&long_resume(""), "Manage the apiary");
        assert!(suggestions.is_empty(), "got {suggestions:?}");
    }

    #[tokio::test]
    async fn test_strategy_reports_rules_source() {
        let result = RuleBasedSuggester
            .suggest(&long_resume(""), "Warehouse lead")
            .await;
        assert_eq!(result.source, SuggestionSource::Rules);
        assert!(result.error.is_none());
    }
}
