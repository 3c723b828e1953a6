use thiserror::Error;

/// Failures of the skill extraction and suggestion contracts.
///
/// Every variant is recoverable: callers convert it into visible state and let
/// the user retry with different input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkillError {
    #[error("Invalid file type. Only .pdf or .txt files are allowed.")]
    InvalidFileType { file_name: String },

    #[error("File is {size} bytes, the maximum is {limit} bytes.")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("The AI model did not return any output for {operation}.")]
    EmptyModelOutput { operation: &'static str },

    #[error("Invalid response format from server.")]
    UnexpectedResponseShape,

    /// Transport failure or a non-success status. The message is the one the
    /// service sent, when it sent one.
    #[error("{0}")]
    Service(String),
}

impl SkillError {
    pub fn empty_extraction() -> Self {
        SkillError::EmptyModelOutput {
            operation: "skill extraction",
        }
    }

    pub fn empty_suggestions() -> Self {
        SkillError::EmptyModelOutput {
            operation: "resume suggestions",
        }
    }
}
