use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::Arc;

mod config;
mod error;
mod logging;
mod routes;
mod services;
pub mod models;

use error::AppError;
use services::lexicon::LexiconScorer;
use services::pipeline::ScoringPipeline;
use services::scorer::SentimentScorer;
use services::template::build_template;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (also reads .env, which may set RUST_LOG)
    let config = config::load_config()?;

    // Initialize logging
    logging::init_logging(&config.log_level)?;

    let lexicon = match &config.lexicon_path {
        Some(path) => LexiconScorer::with_overrides(path)?,
        None => LexiconScorer::default(),
    };
    tracing::info!("Sentiment lexicon ready with {} words", lexicon.len());
    let scorer: Arc<dyn SentimentScorer> = Arc::new(lexicon);

    // Build our application state
    let state = Arc::new(
        AppState::new(config, scorer).context("Failed to build application state")?,
    );
    let addr = state.config.bind_addr;
    tracing::info!(
        "Scoring column '{}', upload limit {}KB",
        state.pipeline.text_column(),
        state.config.max_file_size / 1024
    );

    let app = routes::app(state);

    // Run it
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Application state
#[derive(Clone)]
pub struct AppState {
    config: config::Config,
    pipeline: Arc<ScoringPipeline>,
    /// Upload template, built once and served read-only.
    template: Bytes,
}

impl AppState {
    fn new(config: config::Config, scorer: Arc<dyn SentimentScorer>) -> Result<Self, AppError> {
        let template = build_template(&config.text_column, &config.sheet_name)?;
        let pipeline = Arc::new(ScoringPipeline::from_config(&config, scorer));
        Ok(Self {
            config,
            pipeline,
            template,
        })
    }
}
