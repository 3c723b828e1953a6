use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Upload limit shown to users and enforced on both sides of the wire.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
/// Job descriptions longer than this are truncated before reaching the model.
pub const DEFAULT_MAX_JOB_DESCRIPTION_CHARS: usize = 20_000;
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: u64,
    pub max_job_description_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: env_or("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            max_job_description_chars: env_or(
                "MAX_JOB_DESCRIPTION_CHARS",
                DEFAULT_MAX_JOB_DESCRIPTION_CHARS,
            )?,
        })
    }

    /// Extraction requests carry the file base64-encoded inside JSON, so the
    /// body limit is the upload limit inflated by 4/3 plus headroom.
    pub fn request_body_limit(&self) -> usize {
        (self.max_upload_bytes as usize / 3 + 1) * 4 + 64 * 1024
    }
}

/// Configuration for the command-line client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub rust_log: String,
    pub max_upload_bytes: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(ClientConfig {
            api_url: std::env::var("SKILLSCOPE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
