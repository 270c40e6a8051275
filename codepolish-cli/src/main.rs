//! codepolish CLI entry point
//!
//! Reviews every supported source file under `--input`, writes rewritten files
//! to the mirrored location under `--output` and appends one section per file
//! to `<output>/report.md`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use codepolish_analysis::{process_codebase, FilePipeline};
use codepolish_core::PistonClient;
use codepolish_llm::{GeminiClient, RewriteClient};
use codepolish_utils::config::{load_dotenv, API_KEY_VAR};
use codepolish_utils::logging::{init_logging, LoggerConfig};
use codepolish_utils::AppConfig;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "codepolish")]
#[command(about = "AI code review: run, measure and rewrite a source tree")]
#[command(version)]
struct Cli {
    /// Directory containing the code to review
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving rewritten files and the report
    #[arg(long)]
    output: PathBuf,

    /// What the rewrite should concentrate on
    #[arg(long, default_value = "readability")]
    focus: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env has to be loaded before clap reads the environment
    load_dotenv(None)?;
    let cli = Cli::parse();

    init_logging(LoggerConfig::for_verbosity(cli.verbose))?;

    let config = AppConfig::from_lookup(|_| cli.api_key.clone())
        .with_context(|| format!("Set {} or pass --api-key", API_KEY_VAR))?;

    let pipeline = FilePipeline::new(
        PistonClient::from_config(&config),
        RewriteClient::new(GeminiClient::from_config(&config)),
    );

    let summary = process_codebase(&cli.input, &cli.output, &cli.focus, &pipeline)
        .await
        .with_context(|| format!("Failed to review {}", cli.input.display()))?;

    info!(
        "Report written to {}",
        cli.output.join(codepolish_analysis::REPORT_FILE_NAME).display()
    );
    info!("{}", summary);
    Ok(())
}
