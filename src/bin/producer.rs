//! Seed producer entry point
//!
//! Fetches one page, publishes its same-domain links to the frontier queue
//! and exits.

use anyhow::Context;
use clap::Parser;
use frontier_ripple::config::load_config;
use frontier_ripple::crawler::{parse_seed_url, run_seed, HttpFetcher};
use frontier_ripple::logging::setup_logging;
use frontier_ripple::AmqpQueue;
use std::process::ExitCode;

/// Seed the crawl frontier with the same-domain links of one page
#[derive(Parser, Debug)]
#[command(name = "crawl-producer")]
#[command(version)]
#[command(about = "Seed the crawl frontier from a starting URL", long_about = None)]
struct Cli {
    /// Absolute http(s) URL of the seed page
    #[arg(value_name = "URL")]
    url: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let seed = parse_seed_url(&cli.url)?;

    let mut queue = AmqpQueue::connect(&config.broker)
        .await
        .context("Failed to connect to the message broker")?;
    let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;

    let report = run_seed(&seed, &fetcher, &mut queue).await?;
    queue.close().await.context("Failed to close broker connection")?;

    tracing::info!(
        "Finished publishing {} links from {}",
        report.published.len(),
        report.seed
    );
    Ok(())
}
