//! Suggestion generation: asks the LLM how to tailor a resume to a job description.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::skills::error::SkillError;
use crate::skills::models::{SuggestionInput, SuggestionOutput};
use crate::skills::service::SkillSuggestionService;
use crate::suggestions::prompts::{suggestions_prompt, SUGGESTIONS_SYSTEM};

/// Suggestion backend that calls the model directly.
pub struct LlmSuggestionGenerator {
    llm: LlmClient,
    max_job_description_chars: usize,
}

impl LlmSuggestionGenerator {
    pub fn new(llm: LlmClient, max_job_description_chars: usize) -> Self {
        Self {
            llm,
            max_job_description_chars,
        }
    }
}

#[async_trait]
impl SkillSuggestionService for LlmSuggestionGenerator {
    async fn suggest(&self, input: SuggestionInput) -> Result<SuggestionOutput, SkillError> {
        let prompt = build_prompt(&input, self.max_job_description_chars);
        info!(
            "Generating suggestions for {} skills",
            input.extracted_skills.len()
        );

        let result = self
            .llm
            .call_json::<Option<SuggestionOutput>>(&prompt, SUGGESTIONS_SYSTEM)
            .await;

        interpret_suggestions(result)
    }
}

fn build_prompt(input: &SuggestionInput, max_job_description_chars: usize) -> String {
    let skills = if input.extracted_skills.is_empty() {
        "(none)".to_string()
    } else {
        input.extracted_skills.join(", ")
    };

    let job_description = truncate_chars(input.job_description.trim(), max_job_description_chars);
    if job_description.len() < input.job_description.trim().len() {
        warn!(
            "Job description truncated to {} characters before prompting",
            max_job_description_chars
        );
    }

    suggestions_prompt(&skills, job_description)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// No output from the model is an error. An empty suggestion list is only
/// valid when the model returns one explicitly.
fn interpret_suggestions(
    result: Result<Option<SuggestionOutput>, LlmError>,
) -> Result<SuggestionOutput, SkillError> {
    match result {
        Ok(Some(output)) => Ok(SuggestionOutput {
            suggestions: output
                .suggestions
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }),
        Ok(None) | Err(LlmError::EmptyContent) => Err(SkillError::empty_suggestions()),
        Err(LlmError::Parse(e)) => {
            warn!("Suggestion output did not match the schema: {e}");
            Err(SkillError::UnexpectedResponseShape)
        }
        Err(e) => Err(SkillError::Service(format!(
            "Suggestion generation failed: {e}"
        ))),
    }
}
