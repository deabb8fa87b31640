//! Command-line interface for the converter.

use std::fmt::Write as _;
use std::io::{ErrorKind, Write};
use std::time::Duration;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{CWB_OPENDATA_URL, DEFAULT_MAX_RESPONSE_SIZE, HTTP_TIMEOUT_SECS};
use crate::crawler::{dataset_to_csv_with_options, FetchOptions};
use crate::error::{CrawlerError, Result};
use crate::extract::FIELD_SEPARATOR;
use crate::schema::{default_registry, DatasetRegistry};

/// Convert a CWB open-data XML dataset to CSV on stdout.
#[derive(Debug, Parser)]
#[command(name = "cwb-tocsv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dataset identifier (e.g., O-A0001-001)
    pub dataset_id: Option<String>,

    /// Authorization key (e.g., CWB-1234ABCD-78EF-GH90-12XY-IJKL12345678)
    pub auth_key: Option<String>,

    /// List supported datasets and their columns, then exit
    #[arg(long)]
    pub list_datasets: bool,

    /// API endpoint
    #[arg(long, default_value = CWB_OPENDATA_URL, hide = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

/// Run the CLI with already parsed arguments.
pub fn run_with(cli: Cli) -> Result<()> {
    if cli.list_datasets {
        let listing = format_dataset_list(default_registry());
        return write_output(std::io::stdout().lock(), listing.as_bytes());
    }

    // Check presence here so each missing argument gets its own message.
    let dataset_id = cli.dataset_id.ok_or(CrawlerError::MissingDatasetId)?;
    let auth_key = cli.auth_key.ok_or(CrawlerError::MissingAuthKey)?;

    let options = FetchOptions {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout),
        max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
    };

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Downloading {}...", style(dataset_id.trim()).cyan()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = dataset_to_csv_with_options(&dataset_id, &auth_key, &options);
    pb.finish_and_clear();

    // Nothing reaches stdout unless the whole document converted.
    let csv = result?;
    write_output(std::io::stdout().lock(), csv.as_bytes())
}

/// Write the whole output and flush it.
///
/// A reader that closes the pipe early (`cwb-tocsv ... | head`) is not an
/// error.
fn write_output(mut out: impl Write, bytes: &[u8]) -> Result<()> {
    match out.write_all(bytes).and_then(|()| out.flush()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("Output closed early");
            Ok(())
        }
        other => other.map_err(CrawlerError::from),
    }
}

/// Describe every registered dataset and its column layout.
#[must_use]
pub fn format_dataset_list(registry: &DatasetRegistry) -> String {
    let mut out = String::new();
    for schema in registry.schemas() {
        let columns: Vec<&str> = schema.column_names().collect();
        let _ = writeln!(out, "{}\t{}", schema.dataset_id, schema.title);
        let _ = writeln!(out, "\t{}", columns.join(FIELD_SEPARATOR));
    }
    out
}
