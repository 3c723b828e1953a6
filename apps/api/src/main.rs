mod cli;
mod client;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod results;
mod routes;
mod skills;
mod state;
mod suggestions;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::{ClientConfig, Config};
use crate::extraction::extractor::LlmSkillExtractor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::generator::LlmSuggestionGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Analyze {
            file,
            api_url,
            direct,
            select,
            job_description,
        } => {
            let client_config = ClientConfig::from_env()?;
            init_tracing(&client_config.rust_log);
            cli::run_analyze(&client_config, file, api_url, direct, select, job_description).await
        }
        Command::Suggest {
            skills,
            job_description,
            api_url,
            direct,
        } => {
            let client_config = ClientConfig::from_env()?;
            init_tracing(&client_config.rust_log);
            cli::run_suggest(&client_config, skills, job_description, api_url, direct).await
        }
    }
}

fn init_tracing(rust_log: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting SkillScope API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());
    info!(
        "Upload limit: {} bytes, job description limit: {} chars",
        config.max_upload_bytes, config.max_job_description_chars
    );

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(LlmSkillExtractor::new(llm.clone())),
        suggester: Arc::new(LlmSuggestionGenerator::new(
            llm,
            config.max_job_description_chars,
        )),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
