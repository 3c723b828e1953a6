use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::skills::error::SkillError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidFileType(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    EmptyModelOutput(String),

    #[error("Unexpected response shape from the AI service")]
    UnexpectedResponseShape,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SkillError> for AppError {
    fn from(err: SkillError) -> Self {
        match err {
            SkillError::InvalidFileType { ref file_name } => {
                tracing::info!("Rejected upload with unsupported type: '{file_name}'");
                AppError::InvalidFileType(err.to_string())
            }
            SkillError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            SkillError::InvalidDocument(msg) => AppError::Validation(msg),
            SkillError::EmptyModelOutput { .. } => AppError::EmptyModelOutput(err.to_string()),
            SkillError::UnexpectedResponseShape => AppError::UnexpectedResponseShape,
            SkillError::Service(msg) => AppError::Llm(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFileType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "INVALID_FILE_TYPE",
                msg.clone(),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE", msg.clone())
            }
            AppError::EmptyModelOutput(msg) => {
                tracing::warn!("Empty model output: {msg}");
                (StatusCode::BAD_GATEWAY, "EMPTY_MODEL_OUTPUT", msg.clone())
            }
            AppError::UnexpectedResponseShape => {
                tracing::error!("Model output did not match the expected schema");
                (
                    StatusCode::BAD_GATEWAY,
                    "UNEXPECTED_RESPONSE_SHAPE",
                    "The AI service returned an unexpected response format".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_type_maps_to_415() {
        let err: AppError = SkillError::InvalidFileType {
            file_name: "resume.docx".to_string(),
        }
        .into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_empty_model_output_keeps_message() {
        let err: AppError = SkillError::empty_extraction().into();
        assert_eq!(
            err.to_string(),
            "The AI model did not return any output for skill extraction."
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_service_failure_message_reaches_the_body() {
        let err: AppError =
            SkillError::Service("Skill extraction failed: HTTP error: timed out".to_string())
                .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Skill extraction failed: HTTP error: timed out"
        );
    }

    #[test]
    fn test_invalid_document_is_validation_error() {
        let err: AppError = SkillError::InvalidDocument("document is empty".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
