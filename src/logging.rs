//! Logging setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Crate and binary targets whose events the verbosity flags control
const TARGETS: [&str; 3] = ["frontier_ripple", "crawl_producer", "crawl_worker"];

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, replaces the flag-derived filter entirely.
pub fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| verbosity_filter(verbose, quiet));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the filter directives for `-v`/`-q` without consulting the environment
pub fn verbosity_directives(verbose: u8, quiet: bool) -> String {
    if quiet {
        // Only show errors
        return "error".to_string();
    }

    let (ours, others) = match verbose {
        0 => ("info", "warn"),
        1 => ("debug", "info"),
        2 => ("trace", "debug"),
        _ => return "trace".to_string(),
    };

    let mut directives: Vec<String> = TARGETS
        .iter()
        .map(|target| format!("{}={}", target, ours))
        .collect();
    directives.push(others.to_string());
    directives.join(",")
}

fn verbosity_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::new(verbosity_directives(verbose, quiet))
}
