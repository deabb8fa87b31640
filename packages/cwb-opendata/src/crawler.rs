//! Conversion service that ties the registry, the download and the
//! extractor together.

use std::time::Duration;

use roxmltree::Document;

use crate::config::{
    validate_auth_key, validate_dataset_id, CWB_OPENDATA_URL, DEFAULT_MAX_RESPONSE_SIZE,
    HTTP_TIMEOUT_SECS,
};
use crate::error::Result;
use crate::extract::document_to_csv;
use crate::fetch::download_dataset_xml;
use crate::http::create_client_with_timeout;
use crate::schema::{default_registry, DatasetRegistry, Schema};

/// Connection settings for the open-data API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// API endpoint.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum accepted body size in bytes.
    pub max_response_size: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: CWB_OPENDATA_URL.to_string(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }
}

/// Download a dataset and convert it to CSV using the default registry.
///
/// # Arguments
/// * `dataset_id` - Dataset identifier (e.g., "O-A0001-001")
/// * `auth_key` - Authorization key issued by the API
///
/// # Returns
/// CSV text, one newline-terminated row per location record
pub fn dataset_to_csv(dataset_id: &str, auth_key: &str) -> Result<String> {
    dataset_to_csv_with_options(dataset_id, auth_key, &FetchOptions::default())
}

/// Download a dataset and convert it to CSV with custom connection settings.
pub fn dataset_to_csv_with_options(
    dataset_id: &str,
    auth_key: &str,
    options: &FetchOptions,
) -> Result<String> {
    convert_with(default_registry(), dataset_id, auth_key, |id, key| {
        let client = create_client_with_timeout(options.timeout)?;
        download_dataset_xml(
            &client,
            &options.base_url,
            id,
            key,
            options.max_response_size,
        )
    })
}

/// Convert a dataset using an explicit registry and document source.
///
/// Inputs are validated and the schema is resolved before `fetch` runs, so
/// an unsupported dataset never touches the network. `fetch` receives the
/// trimmed dataset identifier and key and returns the raw XML.
///
/// # Errors
/// Validation errors, `UnsupportedDataset`, and anything `fetch` or the XML
/// parser returns. Field-level problems never produce errors.
pub fn convert_with<F>(
    registry: &DatasetRegistry,
    dataset_id: &str,
    auth_key: &str,
    fetch: F,
) -> Result<String>
where
    F: FnOnce(&str, &str) -> Result<String>,
{
    let dataset_id = validate_dataset_id(dataset_id)?;
    let auth_key = validate_auth_key(auth_key)?;
    let schema = registry.resolve(dataset_id)?;
    tracing::debug!(dataset_id, columns = schema.len(), "Resolved dataset schema");

    let xml = fetch(dataset_id, auth_key)?;
    xml_to_csv(&xml, schema)
}

/// Parse an XML document and render it with a schema.
pub fn xml_to_csv(xml: &str, schema: &Schema) -> Result<String> {
    let doc = Document::parse(xml)?;
    Ok(document_to_csv(&doc, schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AUTH_KEY_EXAMPLE;
    use crate::error::CrawlerError;
    use crate::schema::create_cwb_registry;

    const EMPTY_DOC: &str = r#"<cwbopendata xmlns="urn:cwb:gov:tw:cwbcommon:0.1"><dataid>O-A0001-001</dataid></cwbopendata>"#;

    #[test]
    fn test_convert_with_passes_trimmed_arguments() {
        let registry = create_cwb_registry();
        let padded_key = format!(" {AUTH_KEY_EXAMPLE} ");

        let csv = convert_with(&registry, " O-A0001-001 ", &padded_key, |id, key| {
            assert_eq!(id, "O-A0001-001");
            assert_eq!(key, AUTH_KEY_EXAMPLE);
            Ok(EMPTY_DOC.to_string())
        })
        .unwrap();
        assert_eq!(csv, "");
    }

    #[test]
    fn test_convert_with_unsupported_dataset_skips_fetch() {
        let registry = create_cwb_registry();
        let mut fetched = false;

        let result = convert_with(&registry, "F-C0032-001", AUTH_KEY_EXAMPLE, |_, _| {
            fetched = true;
            Ok(EMPTY_DOC.to_string())
        });

        assert!(matches!(result, Err(CrawlerError::UnsupportedDataset(_))));
        assert!(!fetched);
    }

    #[test]
    fn test_convert_with_validates_before_lookup() {
        let registry = create_cwb_registry();
        let never = |_: &str, _: &str| -> Result<String> { unreachable!("fetch must not run") };

        assert!(matches!(
            convert_with(&registry, "", AUTH_KEY_EXAMPLE, never),
            Err(CrawlerError::MissingDatasetId)
        ));
        assert!(matches!(
            convert_with(&registry, "F-C0032-001", "", never),
            Err(CrawlerError::MissingAuthKey)
        ));
        assert!(matches!(
            convert_with(&registry, "F-C0032-001", "short", never),
            Err(CrawlerError::AuthKeyTooShort { len: 5 })
        ));
    }

    #[test]
    fn test_convert_with_propagates_fetch_failure() {
        let registry = create_cwb_registry();
        let result = convert_with(&registry, "O-A0001-001", AUTH_KEY_EXAMPLE, |_, _| {
            Err(CrawlerError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "refused",
            )))
        });

        assert!(matches!(result, Err(CrawlerError::Io(_))));
    }

    #[test]
    fn test_convert_with_malformed_xml() {
        let registry = create_cwb_registry();
        let result = convert_with(&registry, "O-A0001-001", AUTH_KEY_EXAMPLE, |_, _| {
            Ok("<cwbopendata><location>".to_string())
        });

        let err = result.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.base_url, CWB_OPENDATA_URL);
        assert_eq!(options.timeout, Duration::from_secs(30));
    }
}
