//! Extraction Client: drives one resume upload from file selection to the
//! results location.
//!
//! `idle → validating → (rejected | loading) → (succeeded | failed)`
//!
//! Validation happens before any I/O on the file contents and before any
//! network call. `submit` takes `&mut self`, so one client never has two
//! extractions in flight.

use std::path::Path;

use tracing::{error, info};

use crate::results::navigation::results_location;
use crate::skills::data_uri::{ensure_within_limit, DataUri, FileKind};
use crate::skills::error::SkillError;
use crate::skills::models::ExtractSkillsInput;
use crate::skills::service::SkillExtractionService;

const FAILED_PREFIX: &str = "Failed to extract skills";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    Validating,
    /// Refused locally; nothing was sent.
    Rejected(SkillError),
    Loading,
    /// `location` is the results view carrying the serialized skill list.
    Succeeded { location: String, skill_count: usize },
    Failed(SkillError),
}

impl UploadState {
    /// User-facing message for the terminal error states.
    pub fn message(&self) -> Option<String> {
        match self {
            UploadState::Rejected(err) => Some(err.to_string()),
            UploadState::Failed(err) => Some(format!("{FAILED_PREFIX}: {err}")),
            _ => None,
        }
    }
}

pub struct ExtractionClient<S> {
    service: S,
    max_upload_bytes: u64,
    state: UploadState,
}

impl<S: SkillExtractionService> ExtractionClient<S> {
    pub fn new(service: S, max_upload_bytes: u64) -> Self {
        Self {
            service,
            max_upload_bytes,
            state: UploadState::Idle,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Synchronous pre-flight checks: extension, then size.
    pub fn validate(&mut self, file_name: &str, size: u64) -> Result<FileKind, SkillError> {
        self.state = UploadState::Validating;

        let checked = FileKind::from_file_name(file_name).and_then(|kind| {
            if size == 0 {
                return Err(SkillError::InvalidDocument(
                    "The selected file is empty.".to_string(),
                ));
            }
            ensure_within_limit(size, self.max_upload_bytes)?;
            Ok(kind)
        });

        if let Err(err) = &checked {
            info!("Rejected '{file_name}': {err}");
            self.state = UploadState::Rejected(err.clone());
        }
        checked
    }

    /// Runs the whole flow for `path` and returns the terminal state.
    pub async fn submit(&mut self, path: &Path) -> &UploadState {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        // The extension is checked before touching the filesystem.
        if let Err(err) = FileKind::from_file_name(&file_name) {
            self.state = UploadState::Rejected(err);
            return &self.state;
        }

        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(e) => return self.fail(SkillError::InvalidDocument(e.to_string())),
        };
        let kind = match self.validate(&file_name, size) {
            Ok(kind) => kind,
            Err(_) => return &self.state,
        };

        self.state = UploadState::Loading;

        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) => return self.fail(SkillError::InvalidDocument(e.to_string())),
        };
        let input = ExtractSkillsInput {
            resume_data_uri: DataUri::new(kind.mime_type(), data).encode(),
        };

        let output = match self.service.extract_skills(input).await {
            Ok(output) => output,
            Err(err) => return self.fail(err),
        };

        match results_location(&output.skills) {
            Ok(location) => {
                info!("Extracted {} skills from '{file_name}'", output.skills.len());
                self.state = UploadState::Succeeded {
                    location,
                    skill_count: output.skills.len(),
                };
                &self.state
            }
            Err(e) => self.fail(SkillError::Service(e.to_string())),
        }
    }

    fn fail(&mut self, err: SkillError) -> &UploadState {
        error!("Extraction error: {err}");
        self.state = UploadState::Failed(err);
        &self.state
    }
}
