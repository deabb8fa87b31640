//! Dataset schemas and the registry that selects them.
//!
//! A schema is a table of field descriptors interpreted by the generic
//! extractor in [`crate::extract`]. Supporting another dataset means adding
//! one schema function and one `register` call in [`create_cwb_registry`].

mod config;
mod core;
mod types;

pub use config::{
    automatic_stations_schema, bureau_stations_schema, create_cwb_registry, default_registry,
    AUTOMATIC_STATIONS, BUREAU_STATIONS,
};
pub use self::core::DatasetRegistry;
pub use types::{FieldDescriptor, KeyMatch, KeyedCollection, Schema, Selector, ValueKind};
