//! LLM Client: the single point of entry for all Claude API calls in SkillScope.
//!
//! No other module talks to the Anthropic API directly. Extraction and
//! suggestion backends go through `call_json` / `call_json_with_document`.
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::skills::data_uri::DataUri;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Default model when `ANTHROPIC_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << (attempt - 1))
}

/// Longest a single `call*` can take: every attempt timing out, plus backoff.
pub fn worst_case_call_duration() -> Duration {
    (1..MAX_RETRIES).map(backoff).sum::<Duration>() + REQUEST_TIMEOUT * MAX_RETRIES
}

enum Attempt {
    Done(Result<LlmResponse, LlmError>),
    Retry(LlmError),
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Unsupported document media type: {0}")]
    UnsupportedDocument(String),
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    Document { source: DocumentSource },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum DocumentSource {
    Base64 { media_type: String, data: String },
    Text { media_type: String, data: String },
}

impl DocumentSource {
    /// PDFs travel as base64, text documents are decoded and sent inline.
    fn from_data_uri(document: &DataUri) -> Result<Self, LlmError> {
        let essence = document.essence();
        if essence == "application/pdf" {
            Ok(DocumentSource::Base64 {
                media_type: essence,
                data: STANDARD.encode(&document.data),
            })
        } else if essence.starts_with("text/") {
            Ok(DocumentSource::Text {
                media_type: "text/plain".to_string(),
                data: String::from_utf8_lossy(&document.data).into_owned(),
            })
        } else {
            Err(LlmError::UnsupportedDocument(document.mime_type.clone()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first non-blank text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The single LLM client used by all services in SkillScope.
/// Wraps the Anthropic Messages API with retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw text-only call to the Claude API.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        self.send(vec![ContentPart::Text { text: prompt }], system)
            .await
    }

    /// Sends `document` as a content block ahead of the prompt text.
    pub async fn call_with_document(
        &self,
        document: &DataUri,
        prompt: &str,
        system: &str,
    ) -> Result<LlmResponse, LlmError> {
        let source = DocumentSource::from_data_uri(document)?;
        self.send(
            vec![
                ContentPart::Document { source },
                ContentPart::Text { text: prompt },
            ],
            system,
        )
        .await
    }

    /// Retries rate limits, server errors and transport failures, backing
    /// off 1s then 2s. Other API errors fail immediately.
    async fn send(
        &self,
        content: Vec<ContentPart<'_>>,
        system: &str,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content,
            }],
        };

        let mut last_error = LlmError::RateLimited {
            retries: MAX_RETRIES,
        };
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff(attempt);
                warn!(
                    "LLM attempt {attempt} failed ({last_error}), retrying in {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&request_body).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(err) => last_error = err,
            }
        }
        Err(last_error)
    }

    async fn send_once(&self, request_body: &AnthropicRequest<'_>) -> Attempt {
        let response = match self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request_body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(LlmError::Http(e)),
        };

        let status = response.status();
        if status.is_success() {
            return Attempt::Done(match response.json::<LlmResponse>().await {
                Ok(parsed) => {
                    debug!(
                        "LLM usage: input_tokens={}, output_tokens={}",
                        parsed.usage.input_tokens, parsed.usage.output_tokens
                    );
                    Ok(parsed)
                }
                Err(e) => Err(LlmError::Http(e)),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<AnthropicError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        let err = LlmError::Api {
            status: status.as_u16(),
            message,
        };
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Attempt::Retry(err)
        } else {
            Attempt::Done(Err(err))
        }
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;
        parse_json_text(response.text())
    }

    pub async fn call_json_with_document<T: DeserializeOwned>(
        &self,
        document: &DataUri,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call_with_document(document, prompt, system).await?;
        parse_json_text(response.text())
    }
}

/// `None` or blank text is `EmptyContent`, anything else must be JSON.
pub fn parse_json_text<T: DeserializeOwned>(text: Option<&str>) -> Result<T, LlmError> {
    let text = text.ok_or(LlmError::EmptyContent)?;
    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Drops a surrounding markdown fence (with or without a language tag).
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_fences_are_stripped() {
        let cases = [
            ("```json\n{\"skills\": []}\n```", "{\"skills\": []}"),
            ("```\n{\"skills\": []}\n```", "{\"skills\": []}"),
            ("  {\"skills\": []}\n", "{\"skills\": []}"),
            ("```json\n{\"skills\": []}", "{\"skills\": []}"),
        ];
        for (input, expected) in cases {
            assert_eq!(strip_json_fences(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(2), Duration::from_secs(2));
    }

    #[test]
    fn test_worst_case_covers_all_attempts() {
        assert_eq!(worst_case_call_duration(), Duration::from_secs(363));
    }

    #[test]
    fn test_parse_json_text_none_is_empty_content() {
        let result: Result<Value, _> = parse_json_text(None);
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_parse_json_text_empty_fence_is_empty_content() {
        let result: Result<Value, _> = parse_json_text(Some("```json\n```"));
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_response_text_skips_blank_blocks() {
        let response: LlmResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "text", "text": "  "},
                    {"type": "text", "text": "{\"skills\": []}"}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("{\"skills\": []}"));
    }

    #[test]
    fn test_pdf_document_is_sent_as_base64() {
        let doc = DataUri::new("application/pdf", b"%PDF-".to_vec());
        let part = ContentPart::Document {
            source: DocumentSource::from_data_uri(&doc).unwrap(),
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["source"]["type"], "base64");
        assert_eq!(json["source"]["media_type"], "application/pdf");
        assert_eq!(json["source"]["data"], "JVBERi0=");
    }

    #[test]
    fn test_text_document_is_sent_inline() {
        let doc = DataUri::new("text/plain;charset=utf-8", b"Rust, SQL".to_vec());
        let json = serde_json::to_value(DocumentSource::from_data_uri(&doc).unwrap()).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["media_type"], "text/plain");
        assert_eq!(json["data"], "Rust, SQL");
    }

    #[test]
    fn test_unsupported_document_type() {
        let doc = DataUri::new("application/zip", vec![1, 2, 3]);
        assert!(matches!(
            DocumentSource::from_data_uri(&doc),
            Err(LlmError::UnsupportedDocument(_))
        ));
    }
}
