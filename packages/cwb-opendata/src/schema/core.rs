//! Dataset registry mapping dataset identifiers to schemas.

use std::collections::BTreeMap;

use super::types::Schema;
use crate::config::normalize_dataset_id;
use crate::error::{CrawlerError, Result};

/// Registry mapping dataset identifiers to their schemas.
///
/// Identifiers are normalized (trimmed, hyphens removed) on both insert and
/// lookup, so `O-A0001-001` and `OA0001001` name the same dataset.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl DatasetRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// Register a schema under its dataset identifier.
    ///
    /// A later registration for the same identifier replaces the earlier one.
    pub fn register(&mut self, schema: Schema) {
        let key = normalize_dataset_id(&schema.dataset_id);
        if self.schemas.insert(key, schema).is_some() {
            tracing::warn!("Replaced an already registered dataset schema");
        }
    }

    /// Get the schema for a dataset, if registered.
    #[must_use]
    pub fn get(&self, dataset_id: &str) -> Option<&Schema> {
        self.schemas.get(&normalize_dataset_id(dataset_id))
    }

    /// Resolve the schema for a dataset.
    ///
    /// # Errors
    /// `CrawlerError::UnsupportedDataset` if no schema is registered.
    pub fn resolve(&self, dataset_id: &str) -> Result<&Schema> {
        self.get(dataset_id)
            .ok_or_else(|| CrawlerError::UnsupportedDataset(dataset_id.trim().to_string()))
    }

    /// Check if a dataset is registered.
    #[must_use]
    pub fn is_supported(&self, dataset_id: &str) -> bool {
        self.get(dataset_id).is_some()
    }

    /// Registered dataset identifiers, as published, in sorted order.
    #[must_use]
    pub fn dataset_ids(&self) -> Vec<&str> {
        self.schemas.values().map(|s| s.dataset_id.as_str()).collect()
    }

    /// All registered schemas in identifier order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Number of registered datasets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, KeyMatch};

    fn registry_with(ids: &[&str]) -> DatasetRegistry {
        let mut registry = DatasetRegistry::new();
        for id in ids {
            registry.register(
                Schema::new(*id, "test").with_field(FieldDescriptor::element("TEMP", KeyMatch::Exact)),
            );
        }
        registry
    }

    #[test]
    fn test_registry_register_and_get() {
        let registry = registry_with(&["O-A0001-001"]);

        assert!(registry.get("O-A0001-001").is_some());
        assert!(registry.get("OA0001001").is_some());
        assert!(registry.get(" O-A0001-001\n").is_some());
        assert!(registry.get("O-A0003-001").is_none());
    }

    #[test]
    fn test_registry_resolve_unsupported() {
        let registry = registry_with(&["O-A0001-001"]);

        match registry.resolve(" F-C0032-001 ") {
            Err(CrawlerError::UnsupportedDataset(id)) => assert_eq!(id, "F-C0032-001"),
            other => panic!("expected UnsupportedDataset, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_empty_identifier_is_unsupported() {
        let registry = registry_with(&["O-A0001-001"]);
        assert!(matches!(
            registry.resolve(""),
            Err(CrawlerError::UnsupportedDataset(_))
        ));
    }

    #[test]
    fn test_registry_dataset_ids_sorted() {
        let registry = registry_with(&["O-A0003-001", "O-A0001-001"]);

        assert_eq!(registry.dataset_ids(), vec!["O-A0001-001", "O-A0003-001"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.is_supported("OA0003001"));
    }

    #[test]
    fn test_registry_replaces_duplicate() {
        let mut registry = registry_with(&["O-A0001-001"]);
        registry.register(Schema::new("OA0001001", "replacement"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("O-A0001-001").unwrap().title, "replacement");
    }
}
