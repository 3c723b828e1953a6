//! HTTP client for a SkillScope backend. Implements the same service traits as
//! the direct model backends.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::llm_client::worst_case_call_duration;
use crate::skills::error::SkillError;
use crate::skills::models::{
    ExtractSkillsInput, ExtractSkillsOutput, SuggestionInput, SuggestionOutput,
};
use crate::skills::service::{SkillExtractionService, SkillSuggestionService};

const EXTRACT_PATH: &str = "/api/extract";
const SUGGESTIONS_PATH: &str = "/api/suggestions";
const EXTRACT_FALLBACK: &str = "Failed to extract skills. Server returned an error.";
const SUGGESTIONS_FALLBACK: &str = "Failed to generate suggestions. Server returned an error.";
/// Headroom over the server's own model call, retries included.
const BACKEND_TIMEOUT_MARGIN: Duration = Duration::from_secs(30);

fn backend_timeout() -> Duration {
    worst_case_call_duration() + BACKEND_TIMEOUT_MARGIN
}

#[derive(Clone)]
pub struct HttpSkillService {
    client: Client,
    base_url: String,
}

impl HttpSkillService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(backend_timeout())
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// One request, no retry. Non-success statuses become `SkillError::Service`
    /// carrying the server's message when it sent one.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Value, SkillError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SkillError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkillError::Service(error_message(&body, status, fallback)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|_| SkillError::UnexpectedResponseShape)
    }
}

#[async_trait]
impl SkillExtractionService for HttpSkillService {
    async fn extract_skills(
        &self,
        input: ExtractSkillsInput,
    ) -> Result<ExtractSkillsOutput, SkillError> {
        let value = self.post_json(EXTRACT_PATH, &input, EXTRACT_FALLBACK).await?;
        parse_extraction_response(value)
    }
}

#[async_trait]
impl SkillSuggestionService for HttpSkillService {
    async fn suggest(&self, input: SuggestionInput) -> Result<SuggestionOutput, SkillError> {
        let value = self
            .post_json(SUGGESTIONS_PATH, &input, SUGGESTIONS_FALLBACK)
            .await?;
        serde_json::from_value(value).map_err(|_| SkillError::UnexpectedResponseShape)
    }
}

/// `skills` must be an array when present. A missing or null field is an
/// empty extraction, not a failure.
fn parse_extraction_response(value: Value) -> Result<ExtractSkillsOutput, SkillError> {
    if !value.is_object() {
        return Err(SkillError::UnexpectedResponseShape);
    }
    match value.get("skills") {
        None | Some(Value::Null) => Ok(ExtractSkillsOutput::default()),
        Some(Value::Array(_)) => {
            serde_json::from_value(value).map_err(|_| SkillError::UnexpectedResponseShape)
        }
        Some(_) => Err(SkillError::UnexpectedResponseShape),
    }
}

/// Error text from a non-success response: `error.message`, then `detail`,
/// then `HTTP error <status>`. A body that is not JSON yields `fallback`.
fn error_message(body: &str, status: StatusCode, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .pointer("/error/message")
            .or_else(|| value.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error {}", status.as_u16())),
        Err(_) => fallback.to_string(),
    }
}
