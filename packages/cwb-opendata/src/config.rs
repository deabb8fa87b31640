//! Configuration constants and validation functions for the converter.

use crate::error::{CrawlerError, Result};

/// Base URL of the CWB open-data API.
pub const CWB_OPENDATA_URL: &str = "http://opendata.cwb.gov.tw/opendataapi";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum HTTP response size in bytes (100 MB).
///
/// Documents are held in memory in full, so anything larger is refused.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 100 * 1024 * 1024;

/// Example of an issued authorization key.
pub const AUTH_KEY_EXAMPLE: &str = "CWB-1234ABCD-78EF-GH90-12XY-IJKL12345678";

/// Minimum accepted authorization key length (the length of an issued key).
pub const MIN_AUTH_KEY_LEN: usize = AUTH_KEY_EXAMPLE.len();

/// Validate that a dataset identifier was given.
///
/// Returns the trimmed identifier. Whether the dataset is supported is
/// decided by the registry, not here.
///
/// # Examples
/// ```
/// use cwb_opendata::config::validate_dataset_id;
///
/// assert_eq!(validate_dataset_id(" O-A0001-001 ").unwrap(), "O-A0001-001");
/// assert!(validate_dataset_id("   ").is_err());
/// ```
pub fn validate_dataset_id(dataset_id: &str) -> Result<&str> {
    let trimmed = dataset_id.trim();
    if trimmed.is_empty() {
        return Err(CrawlerError::MissingDatasetId);
    }
    Ok(trimmed)
}

/// Validate an authorization key.
///
/// Returns the trimmed key if it is at least [`MIN_AUTH_KEY_LEN`] characters.
///
/// # Examples
/// ```
/// use cwb_opendata::config::validate_auth_key;
///
/// assert!(validate_auth_key("CWB-1234ABCD-78EF-GH90-12XY-IJKL12345678").is_ok());
/// assert!(validate_auth_key("CWB-1234").is_err());
/// ```
pub fn validate_auth_key(auth_key: &str) -> Result<&str> {
    let trimmed = auth_key.trim();
    if trimmed.is_empty() {
        return Err(CrawlerError::MissingAuthKey);
    }
    let len = trimmed.chars().count();
    if len < MIN_AUTH_KEY_LEN {
        return Err(CrawlerError::AuthKeyTooShort { len });
    }
    Ok(trimmed)
}

/// Normalize a dataset identifier for registry lookup.
///
/// Trims surrounding whitespace and removes hyphens, so `O-A0001-001`
/// becomes `OA0001001`.
///
/// # Examples
/// ```
/// use cwb_opendata::config::normalize_dataset_id;
///
/// assert_eq!(normalize_dataset_id(" O-A0001-001 "), "OA0001001");
/// ```
#[must_use]
pub fn normalize_dataset_id(dataset_id: &str) -> String {
    dataset_id.trim().replace('-', "")
}

/// Build the download URL for a dataset.
///
/// # Arguments
/// * `base_url` - API endpoint, normally [`CWB_OPENDATA_URL`]
/// * `dataset_id` - Dataset identifier as given by the user (trimmed)
/// * `auth_key` - Authorization key (validated with `validate_auth_key` first)
pub fn dataset_url(base_url: &str, dataset_id: &str, auth_key: &str) -> String {
    format!(
        "{}?dataid={dataset_id}&authorizationkey={auth_key}",
        base_url.trim_end_matches('/')
    )
}
