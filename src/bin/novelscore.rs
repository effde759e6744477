//! novelscore command-line entry point

use clap::Parser;
use novelscore::output::write_report;
use novelscore::{Corpus, OutputFormat, ScoringConfig, ScoringEngine, ScoringVariant};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Debug, Parser)]
#[command(name = "novelscore", version, about = "Score survey sentences for novelty")]
struct Cli {
    /// Corpus base name; `<NAME>.csv` is read
    #[arg(default_value = "data")]
    name: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write scores to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ScoringVariant::Extended)]
    variant: ScoringVariant,

    #[arg(long, env = "WORD_FREQUENCY_API_URL", default_value = novelscore::config::DEFAULT_FREQUENCY_API_URL)]
    frequency_api_url: String,

    #[arg(long, env = "CONTEXT_SEARCH_API_URL", default_value = novelscore::config::DEFAULT_SEARCH_API_URL)]
    search_api_url: String,

    #[arg(long, env = "CONTEXT_SEARCH_API_KEY", hide_env_values = true)]
    search_api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = novelscore::config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Samples scored at the same time
    #[arg(long, env = "MAX_CONCURRENT_SAMPLES", default_value_t = novelscore::config::DEFAULT_MAX_CONCURRENT_SAMPLES)]
    concurrency: usize,

    /// Serve `POST /score` instead of scoring a file
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value_t = 8081)]
    port: u16,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ScoringConfig {
        ScoringConfig {
            frequency_api_url: self.frequency_api_url.clone(),
            search_api_url: self.search_api_url.clone(),
            search_api_key: self.search_api_key.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            variant: self.variant,
            max_concurrent_samples: self.concurrency,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries scores
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    let engine = ScoringEngine::from_config(&config)?;

    if cli.serve {
        info!("Serving {:?} variant on port {}", config.variant, cli.port);
        return novelscore::server::run_server(engine, cli.port).await;
    }

    let corpus = Corpus::load(&cli.name)?;
    let report = engine.score_corpus(&corpus).await?;

    match cli.output {
        Some(ref path) => {
            let file = std::fs::File::create(path)?;
            write_report(&report, cli.format, std::io::BufWriter::new(file))?;
            info!("Wrote {} scores to {}", report.samples.len(), path.display());
        }
        None => write_report(&report, cli.format, std::io::stdout().lock())?,
    }

    Ok(())
}
