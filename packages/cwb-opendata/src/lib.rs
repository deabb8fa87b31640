//! CWB open-data converter - Download Central Weather Bureau XML datasets
//! and render their station records as CSV.
//!
//! # Example
//!
//! ```
//! use cwb_opendata::crawler::xml_to_csv;
//! use cwb_opendata::schema::default_registry;
//!
//! let schema = default_registry().resolve("O-A0001-001").unwrap();
//! let xml = r#"<cwbopendata><location><lat>24.9943</lat></location></cwbopendata>"#;
//!
//! let csv = xml_to_csv(xml, schema).unwrap();
//! assert!(csv.starts_with("24.9943,,"));
//! assert_eq!(csv.matches(',').count(), schema.len() - 1);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and argument validation
//! - [`error`]: Error types and Result alias
//! - [`schema`]: Dataset schemas and the registry that selects them
//! - [`extract`]: Record extraction and CSV rendering
//! - [`xml`]: XML utilities
//! - [`http`]: HTTP client
//! - [`fetch`]: Dataset document download
//! - [`crawler`]: Conversion service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod schema;
pub mod xml;

// Re-export main functions
pub use crawler::{convert_with, dataset_to_csv, xml_to_csv};

// Re-export commonly used items
pub use error::{CrawlerError, Result};
pub use schema::{DatasetRegistry, FieldDescriptor, KeyMatch, Schema, ValueKind};
