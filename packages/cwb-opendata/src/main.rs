//! CLI entry point for the converter.

use console::style;
use cwb_opendata::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout carries only CSV.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{} {e}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
