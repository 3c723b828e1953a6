//! Test doubles for the service boundaries and a ready-made `AppState`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{Config, DEFAULT_MAX_JOB_DESCRIPTION_CHARS};
use crate::llm_client::DEFAULT_MODEL;
use crate::skills::error::SkillError;
use crate::skills::models::{
    ExtractSkillsInput, ExtractSkillsOutput, Skill, SuggestionInput, SuggestionOutput,
};
use crate::skills::service::{SkillExtractionService, SkillSuggestionService};
use crate::state::AppState;

pub const TEST_MAX_UPLOAD_BYTES: u64 = 1024;

/// Extraction backend returning a canned result and recording its inputs.
pub struct StubExtractor {
    response: Result<ExtractSkillsOutput, SkillError>,
    calls: AtomicUsize,
    last_input: Mutex<Option<ExtractSkillsInput>>,
}

impl StubExtractor {
    pub fn returning(skills: Vec<Skill>) -> Self {
        Self::with_response(Ok(ExtractSkillsOutput { skills }))
    }

    pub fn failing(err: SkillError) -> Self {
        Self::with_response(Err(err))
    }

    fn with_response(response: Result<ExtractSkillsOutput, SkillError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<ExtractSkillsInput> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl SkillExtractionService for StubExtractor {
    async fn extract_skills(
        &self,
        input: ExtractSkillsInput,
    ) -> Result<ExtractSkillsOutput, SkillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input);
        self.response.clone()
    }
}

/// Suggestion backend returning a canned result and recording its inputs.
pub struct StubSuggester {
    response: Result<SuggestionOutput, SkillError>,
    last_input: Mutex<Option<SuggestionInput>>,
}

impl StubSuggester {
    pub fn returning(suggestions: &[&str]) -> Self {
        Self {
            response: Ok(SuggestionOutput {
                suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            }),
            last_input: Mutex::new(None),
        }
    }

    pub fn failing(err: SkillError) -> Self {
        Self {
            response: Err(err),
            last_input: Mutex::new(None),
        }
    }

    pub fn last_input(&self) -> Option<SuggestionInput> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl SkillSuggestionService for StubSuggester {
    async fn suggest(&self, input: SuggestionInput) -> Result<SuggestionOutput, SkillError> {
        *self.last_input.lock().unwrap() = Some(input);
        self.response.clone()
    }
}

pub fn test_config() -> Config {
    Config {
        anthropic_api_key: "test-key".to_string(),
        anthropic_model: DEFAULT_MODEL.to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        max_job_description_chars: DEFAULT_MAX_JOB_DESCRIPTION_CHARS,
    }
}

pub fn test_state(extractor: Arc<StubExtractor>, suggester: Arc<StubSuggester>) -> AppState {
    AppState {
        config: test_config(),
        extractor,
        suggester,
    }
}
