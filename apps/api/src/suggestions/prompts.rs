// Resume suggestion prompt templates.

pub const SUGGESTIONS_SYSTEM: &str = "\
You are a resume expert who tailors resumes to specific job descriptions. \
You MUST respond with valid JSON only: no markdown fences, no explanations. \
Every suggestion must be a single, concrete, actionable sentence.";

/// Both values are inserted verbatim in a single pass, so braces inside a
/// skill name or the job description are never treated as placeholders.
pub fn suggestions_prompt(skills: &str, job_description: &str) -> String {
    format!(
        r#"Given the following skills extracted from a resume and a job description, provide suggestions for improving the resume to match the job description.

EXTRACTED SKILLS:
{skills}

JOB DESCRIPTION:
{job_description}

OUTPUT SCHEMA (return exactly this structure):
{{
  "suggestions": ["string"]
}}

Return ONLY the JSON object: nothing else, no code fences."#
    )
}
