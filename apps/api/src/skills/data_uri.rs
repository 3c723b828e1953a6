//! Self-describing document transport: `data:<mimetype>;base64,<data>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::skills::error::SkillError;

/// Upload file types accepted by the extraction flow, decided by extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    PlainText,
}

impl FileKind {
    pub const ACCEPTED_EXTENSIONS: [&'static str; 2] = [".pdf", ".txt"];

    /// Case-insensitive extension check. No content sniffing.
    pub fn from_file_name(file_name: &str) -> Result<Self, SkillError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(FileKind::Pdf)
        } else if lower.ends_with(".txt") {
            Ok(FileKind::PlainText)
        } else {
            Err(SkillError::InvalidFileType {
                file_name: file_name.to_string(),
            })
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Pdf => "application/pdf",
            FileKind::PlainText => "text/plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// Parses and base64-decodes a data URI. Rejects empty payloads.
    pub fn parse(uri: &str) -> Result<Self, SkillError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| SkillError::InvalidDocument("missing 'data:' prefix".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| SkillError::InvalidDocument("missing ',' separator".to_string()))?;

        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            SkillError::InvalidDocument("only base64 data URIs are supported".to_string())
        })?;
        if mime_type.is_empty() {
            return Err(SkillError::InvalidDocument(
                "missing media type".to_string(),
            ));
        }

        let data = STANDARD
            .decode(payload)
            .map_err(|e| SkillError::InvalidDocument(format!("invalid base64: {e}")))?;
        if data.is_empty() {
            return Err(SkillError::InvalidDocument("document is empty".to_string()));
        }

        Ok(DataUri::new(mime_type, data))
    }

    /// Media type without parameters, lowercased: `text/plain;charset=utf-8` -> `text/plain`.
    pub fn essence(&self) -> String {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}

/// Upload size check shared by the client and the server.
pub fn ensure_within_limit(size: u64, limit: u64) -> Result<(), SkillError> {
    if size > limit {
        return Err(SkillError::FileTooLarge { size, limit });
    }
    Ok(())
}
