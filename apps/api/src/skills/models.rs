use serde::{Deserialize, Deserializer, Serialize};

/// A named capability extracted from a resume.
///
/// `level` has no fixed range: the model may use a 1-5 proficiency scale or a
/// raw count of mentions. Consumers treat a higher level as more prominent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Skill {
    pub fn new(name: impl Into<String>, level: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            description: description.into(),
        }
    }
}

/// Request body for skill extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSkillsInput {
    /// `data:<mimetype>;base64,<data>`
    pub resume_data_uri: String,
}

/// Response body for skill extraction. A missing or null `skills` field means
/// no skills were detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractSkillsOutput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
}

/// Request body for resume improvement suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionInput {
    pub extracted_skills: Vec<String>,
    pub job_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionOutput {
    pub suggestions: Vec<String>,
}
