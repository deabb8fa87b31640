//! Dataset document downloading.
//!
//! A dataset document is one XML file listing every `location` record the
//! API currently publishes for that dataset.

use reqwest::blocking::Client;

use crate::config::dataset_url;
use crate::error::{CrawlerError, Result};
use crate::http::{bytes_to_string, download_bytes};

/// Download the XML document for a dataset.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `base_url` - API endpoint
/// * `dataset_id` - Dataset identifier (e.g., "O-A0001-001")
/// * `auth_key` - Authorization key issued by the API
/// * `max_size` - Maximum accepted body size in bytes
///
/// # Returns
/// Raw XML content as a string
pub fn download_dataset_xml(
    client: &Client,
    base_url: &str,
    dataset_id: &str,
    auth_key: &str,
    max_size: u64,
) -> Result<String> {
    let url = dataset_url(base_url, dataset_id, auth_key);
    tracing::info!(dataset_id, base_url, key_len = auth_key.len(), "Downloading dataset");

    let bytes = download_bytes(client, &url, max_size).map_err(|e| {
        if let CrawlerError::Http(source) = e {
            // The URL carries the key; keep it out of the message.
            CrawlerError::DatasetDownload {
                dataset_id: dataset_id.to_string(),
                source: source.without_url(),
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, &format!("dataset {dataset_id}")))
}
