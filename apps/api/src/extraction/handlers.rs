//! Axum route handlers for skill extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::skills::data_uri::{ensure_within_limit, DataUri, FileKind};
use crate::skills::models::{ExtractSkillsInput, ExtractSkillsOutput};
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

/// POST /api/extract
///
/// Body: `{ "resumeDataUri": "data:<mimetype>;base64,<data>" }`.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(input): Json<ExtractSkillsInput>,
) -> Result<Json<ExtractSkillsOutput>, AppError> {
    let document = DataUri::parse(&input.resume_data_uri)?;
    ensure_within_limit(document.data.len() as u64, state.config.max_upload_bytes)?;

    let output = state.extractor.extract_skills(input).await?;
    Ok(Json(output))
}

/// POST /api/extract/upload
///
/// Multipart form with a `file` field, as posted by a browser upload form.
/// The file is checked by extension and wrapped in a data URI server-side.
pub async fn handle_extract_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractSkillsOutput>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?;
        let kind = FileKind::from_file_name(&file_name)?;

        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        ensure_within_limit(data.len() as u64, state.config.max_upload_bytes)?;

        info!("Received upload '{}' ({} bytes)", file_name, data.len());

        let input = ExtractSkillsInput {
            resume_data_uri: DataUri::new(kind.mime_type(), data.to_vec()).encode(),
        };
        let output = state.extractor.extract_skills(input).await?;
        return Ok(Json(output));
    }

    Err(AppError::Validation("No resume file provided".to_string()))
}
