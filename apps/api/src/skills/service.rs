//! Service boundaries for the two model-backed operations.
//!
//! Implemented by the direct model backends (`extraction`, `suggestions`) and by
//! the HTTP client (`client::http`), so callers never know which one they hold.

use std::sync::Arc;

use async_trait::async_trait;

use crate::skills::error::SkillError;
use crate::skills::models::{
    ExtractSkillsInput, ExtractSkillsOutput, SuggestionInput, SuggestionOutput,
};

#[async_trait]
pub trait SkillExtractionService: Send + Sync {
    async fn extract_skills(
        &self,
        input: ExtractSkillsInput,
    ) -> Result<ExtractSkillsOutput, SkillError>;
}

#[async_trait]
pub trait SkillSuggestionService: Send + Sync {
    async fn suggest(&self, input: SuggestionInput) -> Result<SuggestionOutput, SkillError>;
}

#[async_trait]
impl<T: SkillExtractionService + ?Sized> SkillExtractionService for Arc<T> {
    async fn extract_skills(
        &self,
        input: ExtractSkillsInput,
    ) -> Result<ExtractSkillsOutput, SkillError> {
        (**self).extract_skills(input).await
    }
}

#[async_trait]
impl<T: SkillSuggestionService + ?Sized> SkillSuggestionService for Arc<T> {
    async fn suggest(&self, input: SuggestionInput) -> Result<SuggestionOutput, SkillError> {
        (**self).suggest(input).await
    }
}
