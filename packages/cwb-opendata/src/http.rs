//! HTTP client wrapper for downloading from the open-data API.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{CrawlerError, Result};

/// User agent string identifying this converter.
const USER_AGENT: &str = concat!("cwb-opendata/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client with the default timeout.
pub fn create_client() -> Result<Client> {
    create_client_with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
}

/// Create a configured HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL.
///
/// Single attempt: a network error or non-success status is returned as-is.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Maximum accepted body size in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let response = client.get(url).send()?.error_for_status()?;

    if let Some(len) = response.content_length() {
        if len > max_size {
            return Err(CrawlerError::ResponseTooLarge {
                size: len,
                limit: max_size,
            });
        }
    }

    let bytes = response.bytes()?;
    let size = bytes.len() as u64;
    if size > max_size {
        return Err(CrawlerError::ResponseTooLarge {
            size,
            limit: max_size,
        });
    }

    tracing::debug!(size, "Downloaded response body");
    Ok(bytes.to_vec())
}

/// Decode a response body as UTF-8.
///
/// Invalid sequences are replaced and a warning is logged, so a single bad
/// byte does not discard an otherwise usable document.
pub fn bytes_to_string(bytes: &[u8], what: &str) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(
                what,
                valid_up_to = e.utf8_error().valid_up_to(),
                "Response is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
