use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pc_inference::{create_model, Enricher, ModelConfig, DEFAULT_MODEL, DEFAULT_MODEL_NAME};
use pc_pipeline::{init_logging, ArxivSource, Pipeline, PipelineConfig, RunArgs};
use pc_speech::{create_synthesizer, Narrator, SpeechConfig, DEFAULT_ENGINE};
use tracing::info;

/// Fetch the newest arXiv papers on a few topics, summarize them in Traditional
/// Chinese and narrate the result. Meant to run once a day.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Enrichment model: gemini or dummy
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Model name passed to the generative-language service
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    model_name: String,

    /// API key for the generative-language service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the generative-language service endpoint
    #[arg(long)]
    model_url: Option<String>,

    /// Speech engine: google or dummy
    #[arg(long, default_value = DEFAULT_ENGINE)]
    speech: String,

    /// Override the speech endpoint
    #[arg(long)]
    speech_url: Option<String>,

    /// Override the arXiv API endpoint
    #[arg(long)]
    arxiv_url: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let logger = init_logging(&cli.log_level);

    let model = create_model(&ModelConfig {
        model: cli.model,
        api_key: cli.api_key,
        model_name: cli.model_name,
        base_url: cli.model_url,
    })
    .context("Failed to set up the enrichment model")?;

    let synthesizer = create_synthesizer(&SpeechConfig {
        engine: cli.speech,
        base_url: cli.speech_url,
    })
    .context("Failed to set up the speech engine")?;

    let config = PipelineConfig::from(cli.run);
    info!(
        "🗂️ {} queries, cap {}, voice {}, {}",
        config.queries.len(),
        config.run_cap,
        config.language_tag,
        config.seen_policy
    );

    let mut pipeline = Pipeline::new(
        config,
        Arc::new(ArxivSource::new(cli.arxiv_url)),
        Enricher::new(model),
        Narrator::new(synthesizer),
    );

    match pipeline.run().await {
        Ok(report) => {
            logger.info(&format!("📊 {}", report));
            Ok(())
        }
        Err(e) => {
            logger.error(&format!("❌ Run aborted: {}", e));
            Err(e.into())
        }
    }
}
