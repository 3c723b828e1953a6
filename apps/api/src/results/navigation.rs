//! Navigation boundary between the upload flow and the results view.
//!
//! A skill list travels as `/results?skills=<percent-encoded JSON array>`.
//! `encode_skill_list` and `decoder::decode_skills_param` are an exact pair.

use crate::skills::models::Skill;

pub const RESULTS_PATH: &str = "/results";
pub const UPLOAD_PATH: &str = "/upload";
pub const SKILLS_PARAM: &str = "skills";

/// JSON-serializes and percent-encodes a skill list.
pub fn encode_skill_list(skills: &[Skill]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(skills)?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Location of the results view for `skills`.
pub fn results_location(skills: &[Skill]) -> Result<String, serde_json::Error> {
    Ok(format!(
        "{RESULTS_PATH}?{SKILLS_PARAM}={}",
        encode_skill_list(skills)?
    ))
}

/// Returns the still-encoded `skills` value from a raw query string.
/// The first occurrence wins.
pub fn skills_param(raw_query: Option<&str>) -> Option<&str> {
    raw_query?
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == SKILLS_PARAM)
        .map(|(_, value)| value)
}

/// Query string part of a location, if any.
pub fn query_of(location: &str) -> Option<&str> {
    location.split_once('?').map(|(_, query)| query)
}
