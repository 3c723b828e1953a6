// Skill extraction prompt templates.

pub const EXTRACT_SKILLS_SYSTEM: &str = "\
You are an expert resume analyst. \
You MUST respond with valid JSON only: no markdown fences, no explanations. \
Only report skills that the attached resume actually mentions or demonstrates.";

pub const EXTRACT_SKILLS_PROMPT: &str = r#"Extract the key skills from the attached resume.

For each skill, identify:
- "name": the name of the skill
- "level": a number for proficiency or frequency, for example 1 to 5 based on how
  emphasized it is, or a count of mentions
- "description": a brief (1-2 sentences) description of how the skill is mentioned
  or demonstrated in the resume

Prioritize technical skills, software proficiency, and significant soft skills.

OUTPUT SCHEMA (return exactly this structure):
{
  "skills": [
    {"name": "string", "level": number, "description": "string"}
  ]
}

If the resume mentions no skills, return {"skills": []}.
Return ONLY the JSON object: nothing else, no code fences."#;
