// Resume improvement suggestions for a target job description.
// Independent of extraction; skill names may be chained in from an extraction result.

pub mod generator;
pub mod handlers;
pub mod prompts;
