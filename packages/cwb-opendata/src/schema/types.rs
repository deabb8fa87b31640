//! Types for declarative dataset schemas.

/// How a field's text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Must parse as a finite decimal number, otherwise rendered empty.
    Numeric,
    /// Emitted as-is (trimmed).
    Text,
}

/// How a keyed entry's name is compared with the target key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    /// The entry name equals the key.
    Exact,
    /// The entry name contains the key. An entry whose name equals the key
    /// still wins over an earlier entry that merely contains it.
    Contains,
}

impl KeyMatch {
    /// Check whether an entry name matches the target key in this mode.
    #[must_use]
    pub fn matches(self, name: &str, key: &str) -> bool {
        match self {
            Self::Exact => name == key,
            Self::Contains => name.contains(key),
        }
    }
}

/// The two repeated (name, value) collections of a location record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyedCollection {
    /// `<weatherElement><elementName/><elementValue><value/></elementValue></weatherElement>`
    WeatherElement,
    /// `<parameter><parameterName/><parameterValue/></parameter>`
    Parameter,
}

impl KeyedCollection {
    /// Tag name of one entry.
    #[must_use]
    pub fn entry_tag(&self) -> &'static str {
        match self {
            Self::WeatherElement => "weatherElement",
            Self::Parameter => "parameter",
        }
    }

    /// Tag name holding the entry's key.
    #[must_use]
    pub fn name_tag(&self) -> &'static str {
        match self {
            Self::WeatherElement => "elementName",
            Self::Parameter => "parameterName",
        }
    }

    /// Tag name holding the entry's value.
    #[must_use]
    pub fn value_tag(&self) -> &'static str {
        match self {
            Self::WeatherElement => "elementValue",
            Self::Parameter => "parameterValue",
        }
    }
}

/// Where a field's text comes from within a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Slash-separated path of child elements (e.g., "lat", "time/obsTime").
    Child(String),

    /// Value of the entry in a keyed collection whose name matches `key`.
    Keyed {
        collection: KeyedCollection,
        key: String,
        mode: KeyMatch,
    },
}

/// Declarative instruction for extracting one column from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name.
    pub name: String,

    /// Where the value is read from.
    pub selector: Selector,

    /// How the value is rendered.
    pub kind: ValueKind,
}

impl FieldDescriptor {
    /// Create a field read from a child element path.
    #[must_use]
    pub fn child(name: impl Into<String>, path: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            selector: Selector::Child(path.into()),
            kind,
        }
    }

    /// Create a numeric field read from a `weatherElement` entry.
    ///
    /// The column is named after the key.
    #[must_use]
    pub fn element(key: impl Into<String>, mode: KeyMatch) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            selector: Selector::Keyed {
                collection: KeyedCollection::WeatherElement,
                key,
                mode,
            },
            kind: ValueKind::Numeric,
        }
    }

    /// Create a text field read from a `parameter` entry.
    ///
    /// The column is named after the key.
    #[must_use]
    pub fn parameter(key: impl Into<String>, mode: KeyMatch) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            selector: Selector::Keyed {
                collection: KeyedCollection::Parameter,
                key,
                mode,
            },
            kind: ValueKind::Text,
        }
    }
}

/// Ordered column layout of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Dataset identifier as published (e.g., "O-A0001-001").
    pub dataset_id: String,

    /// Human-readable dataset title.
    pub title: String,

    /// Fields in output column order.
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new(dataset_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append one field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields, keeping their order.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Column names in output order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
