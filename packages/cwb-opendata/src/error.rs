//! Error types for the converter.
//!
//! Only document-level failures are errors. Missing or unparsable fields
//! inside a record are rendered as empty cells by the extractor and never
//! surface here.

use thiserror::Error;

use crate::config::{AUTH_KEY_EXAMPLE, MIN_AUTH_KEY_LEN};

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum CrawlerError {
    /// No dataset identifier was given.
    #[error("Missing dataset id. Usage: cwb-tocsv <DATASET_ID> <AUTH_KEY> (e.g., O-A0001-001)")]
    MissingDatasetId,

    /// No authorization key was given.
    #[error("Missing authorization key. Usage: cwb-tocsv <DATASET_ID> <AUTH_KEY>")]
    MissingAuthKey,

    /// Authorization key is shorter than the issued key format.
    #[error(
        "Authorization key too short ({len} characters, expected at least {min}). Key example: {example}",
        min = MIN_AUTH_KEY_LEN,
        example = AUTH_KEY_EXAMPLE
    )]
    AuthKeyTooShort { len: usize },

    /// No schema is registered for the dataset.
    #[error("Unsupported dataset: '{0}' is not supported yet")]
    UnsupportedDataset(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download a dataset document.
    #[error("Failed to download dataset {dataset_id}: {source}")]
    DatasetDownload {
        dataset_id: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body exceeded the configured maximum.
    #[error("Response too large: {size} bytes exceeds limit of {limit} bytes")]
    ResponseTooLarge { size: u64, limit: u64 },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlerError {
    /// Whether this error came from retrieving or parsing the remote document.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::DatasetDownload { .. } | Self::ResponseTooLarge { .. } | Self::XmlParse(_)
        )
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, CrawlerError>;
