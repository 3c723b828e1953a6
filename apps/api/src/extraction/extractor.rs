//! Skill Extraction: turns a resume document into structured skill records via the LLM.
//!
//! The model sees the document itself (PDF or plain text); no local parsing happens.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::extraction::prompts::{EXTRACT_SKILLS_PROMPT, EXTRACT_SKILLS_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::skills::data_uri::DataUri;
use crate::skills::error::SkillError;
use crate::skills::models::{ExtractSkillsInput, ExtractSkillsOutput};
use crate::skills::service::SkillExtractionService;

/// Extraction backend that calls the model directly.
pub struct LlmSkillExtractor {
    llm: LlmClient,
}

impl LlmSkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillExtractionService for LlmSkillExtractor {
    async fn extract_skills(
        &self,
        input: ExtractSkillsInput,
    ) -> Result<ExtractSkillsOutput, SkillError> {
        let document = DataUri::parse(&input.resume_data_uri)?;
        info!(
            "Extracting skills from {} document ({} bytes)",
            document.essence(),
            document.data.len()
        );

        let result = self
            .llm
            .call_json_with_document::<Option<ExtractSkillsOutput>>(
                &document,
                EXTRACT_SKILLS_PROMPT,
                EXTRACT_SKILLS_SYSTEM,
            )
            .await;

        let output = interpret_extraction(result)?;
        info!("Extracted {} skills", output.skills.len());
        Ok(output)
    }
}

/// Maps the raw model result onto the extraction contract.
///
/// No output at all (no text, or a JSON `null`) is `EmptyModelOutput`.
/// An object without `skills`, or with `skills: null`, is a successful empty
/// extraction.
fn interpret_extraction(
    result: Result<Option<ExtractSkillsOutput>, LlmError>,
) -> Result<ExtractSkillsOutput, SkillError> {
    match result {
        Ok(Some(output)) => Ok(output),
        Ok(None) | Err(LlmError::EmptyContent) => Err(SkillError::empty_extraction()),
        Err(LlmError::Parse(e)) => {
            warn!("Skill extraction output did not match the schema: {e}");
            Err(SkillError::UnexpectedResponseShape)
        }
        Err(LlmError::UnsupportedDocument(mime)) => Err(SkillError::InvalidDocument(format!(
            "unsupported media type '{mime}'"
        ))),
        Err(e) => Err(SkillError::Service(format!("Skill extraction failed: {e}"))),
    }
}
