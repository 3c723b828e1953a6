//! Axum route handlers for resume suggestions.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::skills::models::{SuggestionInput, SuggestionOutput};
use crate::state::AppState;

/// POST /api/suggestions
///
/// Body: `{ "extractedSkills": [..], "jobDescription": ".." }`.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(input): Json<SuggestionInput>,
) -> Result<Json<SuggestionOutput>, AppError> {
    if input.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let output = state.suggester.suggest(input).await?;
    Ok(Json(output))
}
