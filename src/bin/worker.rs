//! Crawl worker entry point
//!
//! Consumes URLs from the frontier queue until interrupted. Ctrl-C is a
//! normal shutdown: the in-flight message, if any, stays unacknowledged and
//! the broker redelivers it.

use anyhow::Context;
use clap::Parser;
use frontier_ripple::config::load_config;
use frontier_ripple::crawler::HttpFetcher;
use frontier_ripple::logging::setup_logging;
use frontier_ripple::output::log_statistics;
use frontier_ripple::{AmqpQueue, CrawlWorker};
use std::process::ExitCode;

/// Consume the crawl frontier, publishing newly discovered same-domain links
#[derive(Parser, Debug)]
#[command(name = "crawl-worker")]
#[command(version)]
#[command(about = "Crawl URLs from the frontier queue", long_about = None)]
struct Cli {
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
        Err(e) => e.exit(),
    };

    setup_logging(cli.verbose, cli.quiet);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;

    let queue = AmqpQueue::connect(&config.broker)
        .await
        .context("Failed to connect to the message broker")?;
    let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;

    let mut worker = CrawlWorker::new(queue, fetcher, config.worker);

    tokio::select! {
        result = worker.run() => {
            result.context("Worker stopped on a broker error")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Interrupted, shutting down");
        }
    }

    if worker.state().holds_message() {
        tracing::info!(
            "Left an in-flight message unacknowledged ({}), the broker will redeliver it",
            worker.state()
        );
    }
    log_statistics(worker.stats());
    worker
        .into_queue()
        .close()
        .await
        .context("Failed to close broker connection")?;
    Ok(())
}
