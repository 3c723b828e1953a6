use std::sync::Arc;

use crate::config::Config;
use crate::skills::service::{SkillExtractionService, SkillSuggestionService};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction backend. Default: `LlmSkillExtractor`.
    pub extractor: Arc<dyn SkillExtractionService>,
    /// Suggestion backend. Default: `LlmSuggestionGenerator`.
    pub suggester: Arc<dyn SkillSuggestionService>,
}
