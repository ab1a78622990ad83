//! The record contract the engines are generic over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::FieldValue;

/// A structured row of data addressed by field name.
///
/// Reading a field that the record does not have yields
/// [`FieldValue::Missing`]; it is never an error.
///
/// Implement this for your own types to sort and filter them with
/// statically typed fields:
///
/// ```
/// use tablekit_model::{FieldValue, Record};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Record for User {
///     fn field(&self, name: &str) -> FieldValue {
///         match name {
///             "name" => self.name.as_str().into(),
///             "age" => self.age.into(),
///             _ => FieldValue::Missing,
///         }
///     }
///
///     fn field_names(&self) -> Vec<String> {
///         vec!["name".to_string(), "age".to_string()]
///     }
/// }
///
/// let user = User { name: "Alice".into(), age: 25 };
/// assert_eq!(user.field("age"), FieldValue::Number(25.0));
/// assert!(user.field("email").is_missing());
/// ```
pub trait Record {
    /// Value of the named field, or `Missing`.
    fn field(&self, name: &str) -> FieldValue;

    /// Names of every field this record carries.
    fn field_names(&self) -> Vec<String>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> FieldValue {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }
}

impl Record for BTreeMap<String, FieldValue> {
    fn field(&self, name: &str) -> FieldValue {
        self.get(name).cloned().unwrap_or_default()
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// JSON objects are records; any other JSON value has no fields.
impl Record for Value {
    fn field(&self, name: &str) -> FieldValue {
        self.get(name)
            .cloned()
            .map(FieldValue::from)
            .unwrap_or_default()
    }

    fn field_names(&self) -> Vec<String> {
        self.as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// A general-purpose record backed by an ordered field map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Borrow a field value without cloning.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Record for Row {
    fn field(&self, name: &str) -> FieldValue {
        self.fields.field(name)
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.field_names()
    }
}

impl From<BTreeMap<String, FieldValue>> for Row {
    fn from(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
