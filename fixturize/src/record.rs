//! Raw records read from data files, and the normalized records the mapper
//! produces from them.

use std::collections::HashMap;

use indexmap::IndexMap;

/// Attribute holding a record's primary key.
pub const PK_ATTRIBUTE: &str = "Id";

/// One record element's attributes, by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    attrs: HashMap<String, String>,
}

impl RawRecord {
    /// Create a record with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an attribute, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attrs.insert(name.into(), value.into())
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A column value on a [`RecordDict`]: the source attribute's text, or an
/// explicit marker that the source record did not have the attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// The attribute was present; the text is kept verbatim.
    Present(String),
    /// The attribute was missing. Distinct from an empty string.
    Absent,
}

impl FieldValue {
    /// Returns `Some(&str)` if the value is present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Present(text) => Some(text),
            FieldValue::Absent => None,
        }
    }

    /// Returns `true` for the absent marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(text) => FieldValue::Present(text.to_owned()),
            None => FieldValue::Absent,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Present(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Present(text)
    }
}

/// One normalized record: the model label, the primary key, and the column
/// values in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDict {
    /// Fully qualified model label, `<namespace>.<entity>`.
    pub model: String,
    /// Primary key value.
    pub pk: String,
    /// Column values keyed by column name, in insertion order.
    pub fields: IndexMap<String, FieldValue>,
}

impl RecordDict {
    /// Create a record with no fields.
    pub fn new(model: impl Into<String>, pk: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            pk: pk.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by column name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Fields that will be emitted, in order: every present value.
    pub fn present_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.as_text()?)))
    }
}
