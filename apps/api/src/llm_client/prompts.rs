// Prompt templates sent to the local inference server.

/// Resume review prompt. Replace `{job_description}` and `{resume_text}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = "You are an expert resume reviewer.

Here is a job description:
{job_description}

And here is a resume:
{resume_text}

Give 3 personalized, actionable suggestions to improve the resume to better match the job. \
Return each suggestion as a short sentence, separated by new lines.";

/// Fills the review prompt with both documents.
pub fn build_suggestion_prompt(resume_text: &str, job_description: &str) -> String {
    // Substitute the resume last so a `{job_description}` token inside it is left alone.
    SUGGESTION_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}
