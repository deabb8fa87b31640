//! Record extraction: render every `location` record of a document as one
//! CSV row according to a schema.
//!
//! Extraction never fails. A field that is absent, or a numeric field whose
//! text does not parse, renders as [`NULL_MARKER`] and the row keeps its
//! column count.

use roxmltree::{Document, Node};

use crate::schema::{FieldDescriptor, KeyMatch, KeyedCollection, Schema, Selector, ValueKind};
use crate::xml::{find_children, find_descendants, text_at};

/// Tag name of one record.
pub const RECORD_TAG: &str = "location";

/// Separator between fields of a row.
pub const FIELD_SEPARATOR: &str = ",";

/// Terminator after every row.
pub const ROW_TERMINATOR: &str = "\n";

/// Rendered value of a missing or unparsable field.
pub const NULL_MARKER: &str = "";

/// One (name, value) entry of a record's keyed collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedValue {
    pub name: String,
    pub value: String,
}

/// Read-only view of one `location` element.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Record<'a, 'input> {
    /// Wrap a `location` node.
    #[must_use]
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// Trimmed text of a child element path (e.g., "time/obsTime").
    #[must_use]
    pub fn child_text(&self, path: &str) -> Option<String> {
        text_at(self.node, path)
    }

    /// Entries of one keyed collection, in document order.
    #[must_use]
    pub fn entries(&self, collection: KeyedCollection) -> Vec<KeyedValue> {
        find_children(self.node, collection.entry_tag())
            .map(|entry| KeyedValue {
                name: text_at(entry, collection.name_tag()).unwrap_or_default(),
                value: entry_value(entry, collection).unwrap_or_default(),
            })
            .collect()
    }

    /// Value of the entry in `collection` whose name matches `key`.
    #[must_use]
    pub fn keyed_value(
        &self,
        collection: KeyedCollection,
        key: &str,
        mode: KeyMatch,
    ) -> Option<String> {
        let entries = self.entries(collection);
        lookup(&entries, key, mode).map(str::to_string)
    }
}

/// Value text of one keyed entry.
///
/// Weather elements nest the value as `elementValue/value`; older documents
/// put the text directly in `elementValue`.
fn entry_value(entry: Node<'_, '_>, collection: KeyedCollection) -> Option<String> {
    let value_tag = collection.value_tag();
    if collection == KeyedCollection::WeatherElement {
        if let Some(value) = text_at(entry, &format!("{value_tag}/value")) {
            return Some(value);
        }
    }
    text_at(entry, value_tag)
}

/// Find the value paired with `key` in a keyed collection.
///
/// An entry whose name equals `key` is preferred in both modes. In
/// [`KeyMatch::Contains`] mode the first entry whose name contains `key` is
/// used only when no exact entry exists.
#[must_use]
pub fn lookup<'e>(entries: &'e [KeyedValue], key: &str, mode: KeyMatch) -> Option<&'e str> {
    entries
        .iter()
        .find(|e| e.name == key)
        .or_else(|| match mode {
            KeyMatch::Exact => None,
            KeyMatch::Contains => entries.iter().find(|e| mode.matches(&e.name, key)),
        })
        .map(|e| e.value.as_str())
}

/// Select every record in the document, in document order.
pub fn select_records<'a, 'input: 'a>(
    doc: &'a Document<'input>,
) -> impl Iterator<Item = Record<'a, 'input>> {
    find_descendants(doc, RECORD_TAG).map(Record::new)
}

/// Render a raw value according to its kind.
///
/// Numeric values keep their source text (so "121.3150" is not shortened)
/// once it is known to parse as a finite number.
#[must_use]
pub fn render_value(raw: Option<&str>, kind: ValueKind) -> String {
    let Some(raw) = raw.map(str::trim) else {
        return NULL_MARKER.to_string();
    };
    match kind {
        ValueKind::Text => raw.to_string(),
        ValueKind::Numeric => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => raw.to_string(),
            _ => {
                tracing::trace!(value = raw, "Unparsable numeric value");
                NULL_MARKER.to_string()
            }
        },
    }
}

/// Render one field of a record.
#[must_use]
pub fn render_field(record: &Record<'_, '_>, field: &FieldDescriptor) -> String {
    let raw = match &field.selector {
        Selector::Child(path) => record.child_text(path),
        Selector::Keyed {
            collection,
            key,
            mode,
        } => record.keyed_value(*collection, key, *mode),
    };
    if raw.is_none() {
        tracing::trace!(field = %field.name, "Field missing from record");
    }
    render_value(raw.as_deref(), field.kind)
}

/// Render one record as a CSV row, including the row terminator.
#[must_use]
pub fn render_row(record: &Record<'_, '_>, schema: &Schema) -> String {
    let values: Vec<String> = schema
        .fields
        .iter()
        .map(|field| render_field(record, field))
        .collect();
    let mut row = values.join(FIELD_SEPARATOR);
    row.push_str(ROW_TERMINATOR);
    row
}

/// Render every record of a document as CSV.
///
/// A document without records renders as an empty string.
#[must_use]
pub fn document_to_csv(doc: &Document<'_>, schema: &Schema) -> String {
    let mut csv = String::new();
    let mut rows = 0usize;
    for record in select_records(doc) {
        csv.push_str(&render_row(&record, schema));
        rows += 1;
    }
    tracing::debug!(dataset_id = %schema.dataset_id, rows, "Rendered CSV rows");
    csv
}
