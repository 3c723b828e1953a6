//! Command-line frontend: run the API, or drive the upload flow against it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::client::http::HttpSkillService;
use crate::client::upload::{ExtractionClient, UploadState};
use crate::config::{ClientConfig, Config};
use crate::extraction::extractor::LlmSkillExtractor;
use crate::llm_client::LlmClient;
use crate::results::navigation::{query_of, skills_param};
use crate::results::render::render_page;
use crate::results::view::ResultsPage;
use crate::skills::models::SuggestionInput;
use crate::skills::service::{SkillExtractionService, SkillSuggestionService};
use crate::suggestions::generator::LlmSuggestionGenerator;

#[derive(Parser)]
#[command(name = "skillscope")]
#[command(about = "Extract skills from a resume with an LLM and chart them", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Extract skills from a .pdf or .txt resume and print the results
    Analyze {
        file: PathBuf,
        /// Backend to call instead of SKILLSCOPE_API_URL
        #[arg(long)]
        api_url: Option<String>,
        /// Call the model directly instead of a backend (needs ANTHROPIC_API_KEY)
        #[arg(long)]
        direct: bool,
        /// Show the detail panel for this skill
        #[arg(long)]
        select: Option<String>,
        /// Also ask for suggestions against this job description file
        #[arg(long)]
        job_description: Option<PathBuf>,
    },
    /// Ask for resume suggestions for a set of skills and a job description
    Suggest {
        /// Skill name; repeat for several
        #[arg(long = "skill")]
        skills: Vec<String>,
        /// File containing the job description
        #[arg(long)]
        job_description: PathBuf,
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        direct: bool,
    },
}

pub async fn run_analyze(
    client_config: &ClientConfig,
    file: PathBuf,
    api_url: Option<String>,
    direct: bool,
    select: Option<String>,
    job_description: Option<PathBuf>,
) -> Result<()> {
    let page = if direct {
        let config = Config::from_env()?;
        let extractor = LlmSkillExtractor::new(llm_from(&config));
        upload(extractor, client_config.max_upload_bytes, &file).await?
    } else {
        let base = api_url.unwrap_or_else(|| client_config.api_url.clone());
        upload(HttpSkillService::new(base), client_config.max_upload_bytes, &file).await?
    };

    let page = match (page, select) {
        (ResultsPage::Skills(mut view), Some(name)) => {
            if view.select_by_name(&name).is_none() {
                eprintln!("No skill named '{name}' in the results.");
            }
            ResultsPage::Skills(view)
        }
        (page, _) => page,
    };
    print!("{}", render_page(&page));

    if let (Some(path), ResultsPage::Skills(view)) = (job_description, &page) {
        let skills = view.skills().iter().map(|s| s.name.clone()).collect();
        run_suggest(client_config, skills, path, None, direct).await?;
    }
    Ok(())
}

pub async fn run_suggest(
    client_config: &ClientConfig,
    skills: Vec<String>,
    job_description: PathBuf,
    api_url: Option<String>,
    direct: bool,
) -> Result<()> {
    let job_description = tokio::fs::read_to_string(&job_description)
        .await
        .with_context(|| format!("Failed to read {}", job_description.display()))?;
    let input = SuggestionInput {
        extracted_skills: skills,
        job_description,
    };

    let output = if direct {
        let config = Config::from_env()?;
        LlmSuggestionGenerator::new(llm_from(&config), config.max_job_description_chars)
            .suggest(input)
            .await
    } else {
        let base = api_url.unwrap_or_else(|| client_config.api_url.clone());
        HttpSkillService::new(base).suggest(input).await
    }
    .map_err(|e| anyhow::anyhow!("Failed to generate suggestions: {e}"))?;

    println!("\nSuggestions");
    if output.suggestions.is_empty() {
        println!("  No suggestions returned.");
    }
    for suggestion in output.suggestions {
        println!("  - {suggestion}");
    }
    Ok(())
}

/// Runs the upload flow, then hands the location to the results view.
async fn upload<S: SkillExtractionService>(
    service: S,
    max_upload_bytes: u64,
    file: &std::path::Path,
) -> Result<ResultsPage> {
    let mut client = ExtractionClient::new(service, max_upload_bytes);
    match client.submit(file).await {
        UploadState::Succeeded { location, .. } => {
            Ok(ResultsPage::load(skills_param(query_of(location))))
        }
        state => bail!(state
            .message()
            .unwrap_or_else(|| "Extraction did not complete".to_string())),
    }
}

fn llm_from(config: &Config) -> LlmClient {
    LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_model.clone(),
    )
}
