//! Download tests against a mock open-data API.
//!
//! The client is blocking, so every call runs inside `spawn_blocking`.

use std::time::Duration;

use cwb_opendata::config::AUTH_KEY_EXAMPLE;
use cwb_opendata::crawler::{dataset_to_csv_with_options, FetchOptions};
use cwb_opendata::CrawlerError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cwbopendata xmlns="urn:cwb:gov:tw:cwbcommon:0.1">
  <location>
    <lat>24.9943</lat>
    <lon>121.3150</lon>
    <locationName>桃園</locationName>
    <stationId>C0C480</stationId>
    <time><obsTime>2016-07-17T21:10:00+08:00</obsTime></time>
    <weatherElement><elementName>TEMP</elementName><elementValue><value>29.4</value></elementValue></weatherElement>
    <parameter><parameterName>CITY</parameterName><parameterValue>桃園市</parameterValue></parameter>
  </location>
</cwbopendata>"#;

fn options_for(server: &MockServer) -> FetchOptions {
    FetchOptions {
        base_url: format!("{}/opendataapi", server.uri()),
        timeout: Duration::from_secs(5),
        ..FetchOptions::default()
    }
}

async fn convert(
    dataset_id: &'static str,
    options: FetchOptions,
) -> Result<String, CrawlerError> {
    tokio::task::spawn_blocking(move || {
        dataset_to_csv_with_options(dataset_id, AUTH_KEY_EXAMPLE, &options)
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_and_convert() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/opendataapi"))
        .and(query_param("dataid", "O-A0001-001"))
        .and(query_param("authorizationkey", AUTH_KEY_EXAMPLE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(DOCUMENT.as_bytes().to_vec(), "application/xml; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let csv = convert("O-A0001-001", options_for(&server))
        .await
        .expect("conversion should succeed");

    assert_eq!(
        csv,
        "24.9943,121.3150,桃園,C0C480,2016-07-17T21:10:00+08:00,,,29.4,,,,,,,,桃園市,,,\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_key_is_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/opendataapi"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = convert("O-A0001-001", options_for(&server))
        .await
        .expect_err("401 must fail");

    assert!(err.is_fetch_failure());
    match err {
        CrawlerError::DatasetDownload { dataset_id, source } => {
            assert_eq!(dataset_id, "O-A0001-001");
            assert_eq!(source.status().map(|s| s.as_u16()), Some(401));
            assert!(!source.to_string().contains(AUTH_KEY_EXAMPLE));
        }
        other => panic!("expected DatasetDownload, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/opendataapi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = convert("O-A0003-001", options_for(&server))
        .await
        .expect_err("503 must fail");
    assert!(matches!(err, CrawlerError::DatasetDownload { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_document_is_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/opendataapi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance"))
        .mount(&server)
        .await;

    let err = convert("O-A0001-001", options_for(&server))
        .await
        .expect_err("malformed XML must fail");
    assert!(matches!(err, CrawlerError::XmlParse(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_oversized_response_is_refused() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/opendataapi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DOCUMENT))
        .mount(&server)
        .await;

    let options = FetchOptions {
        max_response_size: 16,
        ..options_for(&server)
    };
    let err = convert("O-A0001-001", options)
        .await
        .expect_err("oversized body must fail");
    assert!(matches!(
        err,
        CrawlerError::ResponseTooLarge { limit: 16, .. }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsupported_dataset_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DOCUMENT))
        .expect(0)
        .mount(&server)
        .await;

    let err = convert("F-C0032-001", options_for(&server))
        .await
        .expect_err("unsupported dataset must fail");
    assert!(matches!(err, CrawlerError::UnsupportedDataset(_)));
}
