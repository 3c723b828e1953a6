//! Results Decoder: rebuilds a skill list from untrusted, URL-transported data.
//!
//! Never fails past its boundary with anything but `MalformedPayload`, and
//! only when the payload as a whole is unusable. Individual bad entries are
//! dropped and logged.
//!
//! Per-entry rules:
//! - `name`: string, non-empty after trimming (stored trimmed), else dropped
//! - `level`: finite number, or an integer string (optional sign, digits only), else dropped
//! - `description`: string kept verbatim; absent, null or non-string → `""`

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::skills::models::Skill;

/// The transported skill list cannot be used at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedPayload {
    #[error("skills parameter is not valid percent-encoding: {0}")]
    Encoding(String),

    #[error("skills parameter is not valid JSON: {0}")]
    Json(String),

    #[error("skills parameter is not a JSON array")]
    NotAnArray,

    /// A non-empty list where every entry failed validation points at a
    /// transport bug, not at a resume without skills.
    #[error("none of the {count} skill entries were valid")]
    NoValidEntries { count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodedSkills {
    /// No parameter, or an empty array: render the "no skills" state.
    Empty,
    /// At least one valid skill, in transported order.
    Skills(Vec<Skill>),
}

/// Decodes the raw (still percent-encoded) `skills` query value.
pub fn decode_skills_param(raw: Option<&str>) -> Result<DecodedSkills, MalformedPayload> {
    let Some(raw) = raw else {
        return Ok(DecodedSkills::Empty);
    };

    let json = urlencoding::decode(raw).map_err(|e| MalformedPayload::Encoding(e.to_string()))?;
    let parsed: Value =
        serde_json::from_str(&json).map_err(|e| MalformedPayload::Json(e.to_string()))?;
    let Value::Array(entries) = parsed else {
        return Err(MalformedPayload::NotAnArray);
    };

    if entries.is_empty() {
        return Ok(DecodedSkills::Empty);
    }

    let skills = validate_skill_entries(&entries);
    if skills.is_empty() {
        return Err(MalformedPayload::NoValidEntries {
            count: entries.len(),
        });
    }
    Ok(DecodedSkills::Skills(skills))
}

/// Validates entries independently, in array order, keeping the valid ones.
pub fn validate_skill_entries(entries: &[Value]) -> Vec<Skill> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let skill = validate_entry(entry);
            if skill.is_none() {
                warn!("Invalid skill data at index {index} skipped: {entry}");
            }
            skill
        })
        .collect()
}

fn validate_entry(entry: &Value) -> Option<Skill> {
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())?;
    let level = entry.get("level").and_then(parse_level)?;
    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(Skill::new(name, level, description))
}

fn parse_level(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|level| level.is_finite()),
        Value::String(s) => parse_integer_string(s),
        _ => None,
    }
}

/// Optional sign followed by ASCII digits only. Magnitude is not bounded.
fn parse_integer_string(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|level| level.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::navigation::encode_skill_list;
    use serde_json::json;

    fn decode_json(value: Value) -> Result<DecodedSkills, MalformedPayload> {
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        decode_skills_param(Some(&encoded))
    }

    fn decoded_skills(value: Value) -> Vec<Skill> {
        match decode_json(value).unwrap() {
            DecodedSkills::Skills(skills) => skills,
            DecodedSkills::Empty => vec![],
        }
    }

    #[test]
    fn test_absent_param_is_empty_state() {
        assert_eq!(decode_skills_param(None), Ok(DecodedSkills::Empty));
    }

    #[test]
    fn test_empty_array_is_empty_state() {
        assert_eq!(decode_json(json!([])), Ok(DecodedSkills::Empty));
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let skills = vec![
            Skill::new("Python", 5.0, "Used Python for 5 years."),
            Skill::new("C++ & C#", 2.5, "Mentions \"modern\" C++ at 40% of roles; ünïcode."),
            Skill::new("Leadership", 1.0, ""),
            Skill::new("Go", -3.0, "Negative levels are not clamped."),
        ];
        let encoded = encode_skill_list(&skills).unwrap();
        assert_eq!(
            decode_skills_param(Some(&encoded)),
            Ok(DecodedSkills::Skills(skills))
        );
    }

    #[test]
    fn test_round_trip_of_empty_list() {
        let encoded = encode_skill_list(&[]).unwrap();
        assert_eq!(decode_skills_param(Some(&encoded)), Ok(DecodedSkills::Empty));
    }

    #[test]
    fn test_round_trip_of_long_list() {
        let skills: Vec<Skill> = (0..250)
            .map(|i| Skill::new(format!("Skill {i}"), i as f64, format!("Evidence {i}")))
            .collect();
        let encoded = encode_skill_list(&skills).unwrap();
        assert_eq!(
            decode_skills_param(Some(&encoded)),
            Ok(DecodedSkills::Skills(skills))
        );
    }

    #[test]
    fn test_mixed_entries_keep_only_valid_in_order() {
        let skills = decoded_skills(json!([
            {"name": "Rust", "level": 4},
            {"name": "", "level": 3},
            {"level": 2},
            {"name": "SQL", "level": "abc"},
            "not an object",
            {"name": "Docker", "level": "2"},
            {"name": "Go", "level": null},
            {"name": 42, "level": 1},
            {"name": "Kafka", "level": 1.5, "description": 7}
        ]));
        assert_eq!(
            skills,
            vec![
                Skill::new("Rust", 4.0, ""),
                Skill::new("Docker", 2.0, ""),
                Skill::new("Kafka", 1.5, ""),
            ]
        );
    }

    #[test]
    fn test_output_size_does_not_depend_on_position() {
        let valid = json!({"name": "Rust", "level": 1});
        let invalid = json!({"name": "   ", "level": 1});
        for position in 0..4 {
            let mut entries = vec![valid.clone(), valid.clone(), valid.clone()];
            entries.insert(position, invalid.clone());
            assert_eq!(decoded_skills(Value::Array(entries)).len(), 3);
        }
    }

    #[test]
    fn test_all_invalid_non_empty_is_malformed() {
        assert_eq!(
            decode_json(json!([{"name": ""}, {"level": 3}])),
            Err(MalformedPayload::NoValidEntries { count: 2 })
        );
    }

    #[test]
    fn test_level_string_integer_is_numeric() {
        let skills = decoded_skills(json!([{"name": "Rust", "level": "3"}]));
        assert_eq!(skills[0].level, 3.0);
    }

    #[test]
    fn test_level_non_numeric_string_drops_entry() {
        let skills = decoded_skills(json!([
            {"name": "Rust", "level": "abc"},
            {"name": "SQL", "level": 1}
        ]));
        assert_eq!(skills, vec![Skill::new("SQL", 1.0, "")]);
    }

    #[test]
    fn test_out_of_range_level_drops_only_that_entry() {
        let raw = urlencoding::encode(
            r#"[{"name":"Rust","level":4},{"name":"Big","level":1e400},{"name":"Tiny","level":-1e400}]"#,
        )
        .into_owned();
        assert_eq!(
            decode_skills_param(Some(&raw)),
            Ok(DecodedSkills::Skills(vec![Skill::new("Rust", 4.0, "")]))
        );
    }

    #[test]
    fn test_level_string_beyond_i64_is_kept() {
        let skills = decoded_skills(json!([
            {"name": "Rust", "level": 1},
            {"name": "Huge", "level": "99999999999999999999"}
        ]));
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[1].level, 1e20);
    }

    #[test]
    fn test_level_string_must_be_a_clean_integer() {
        assert_eq!(parse_level(&json!("3abc")), None);
        assert_eq!(parse_level(&json!("2.5")), None);
        assert_eq!(parse_level(&json!(" 7 ")), Some(7.0));
        assert_eq!(parse_level(&json!(true)), None);
        assert_eq!(parse_level(&json!("-4")), Some(-4.0));
        assert_eq!(parse_level(&json!("+5")), Some(5.0));
        assert_eq!(parse_level(&json!("-")), None);
        assert_eq!(parse_level(&json!("1e3")), None);
    }

    #[test]
    fn test_description_defaults() {
        let skills = decoded_skills(json!([
            {"name": "A", "level": 1, "description": null},
            {"name": "B", "level": 1},
            {"name": "C", "level": 1, "description": "Used Python for 5 years."}
        ]));
        assert_eq!(skills[0].description, "");
        assert_eq!(skills[1].description, "");
        assert_eq!(skills[2].description, "Used Python for 5 years.");
    }

    #[test]
    fn test_name_is_trimmed() {
        let skills = decoded_skills(json!([{"name": "  Rust \n", "level": 1}]));
        assert_eq!(skills[0].name, "Rust");
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            decode_skills_param(Some("%5B%7B")),
            Err(MalformedPayload::Json(_))
        ));
    }

    #[test]
    fn test_invalid_percent_encoding_is_malformed() {
        // %FF decodes to a byte that is not valid UTF-8.
        assert!(matches!(
            decode_skills_param(Some("%FF")),
            Err(MalformedPayload::Encoding(_))
        ));
    }

    #[test]
    fn test_non_array_is_malformed() {
        assert_eq!(
            decode_json(json!({"skills": []})),
            Err(MalformedPayload::NotAnArray)
        );
        assert_eq!(decode_json(json!("Rust")), Err(MalformedPayload::NotAnArray));
    }
}
