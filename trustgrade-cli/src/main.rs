//! Trustgrade CLI: scores the models listed in a URL file and prints NDJSON.

mod logging;
mod output;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use trustgrade_core::{Evaluator, TrustConfig};

/// Score ML models, datasets, and code repositories for trustworthiness
#[derive(Parser, Debug)]
#[command(name = "trustgrade", version, about, long_about = None)]
struct Cli {
    /// File with one batch of comma-separated URLs per line
    url_file: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum metrics evaluated concurrently
    #[arg(short, long)]
    workers: Option<usize>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn apply(&self, config: &mut TrustConfig) {
        if let Some(workers) = self.workers {
            config.evaluator.max_workers = workers;
        }
        config.logging.level = if self.quiet {
            0
        } else {
            config.logging.level.max(self.verbose)
        };
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let workspace = std::env::current_dir().ok();

    let mut config = trustgrade_core::load_config(workspace.as_deref(), cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    cli.apply(&mut config);

    let _log_guard = logging::init(&config.logging);

    let evaluator = Evaluator::new(&config)?;
    tracing::debug!(
        workers = evaluator.max_workers(),
        hub = %config.hub.base_url,
        code_host = %config.code_host.api_base_url,
        "Evaluator ready"
    );
    let records = evaluator.evaluate_file(&cli.url_file).await;

    if records.is_empty() {
        eprintln!("No results generated");
        return Ok(ExitCode::FAILURE);
    }

    output::write_ndjson(std::io::stdout().lock(), &records)?;
    Ok(ExitCode::SUCCESS)
}
