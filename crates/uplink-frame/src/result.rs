//! The decode result record.
//!
//! A [`DecodeResult`] serializes to the same shape an uplink formatter
//! returns to a LoRaWAN network server:
//!
//! ```text
//! { "data": { "tx_reason": "Timer Event", ... }, "warnings": [], "errors": [] }
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{DecodeError, DecodeWarning};

/// A single decoded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A label or substituted description.
    Text(String),
    /// An integer quantity or raw code.
    Int(i64),
    /// A scaled measurement.
    Float(f64),
}

impl FieldValue {
    /// The value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i8> for FieldValue {
    fn from(i: i8) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u8> for FieldValue {
    fn from(i: u8) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u16> for FieldValue {
    fn from(i: u16) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

/// Decoded fields in extraction order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedFields {
    entries: Vec<(&'static str, FieldValue)>,
}

impl DecodedFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A field that already exists keeps its position.
    pub fn insert(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field was decoded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in extraction order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Iterate over `(name, value)` pairs in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }
}

impl Serialize for DecodedFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Fields and diagnostics produced by one decode call.
///
/// `errors` is non-empty exactly when `data` is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DecodeResult {
    /// Decoded fields.
    pub data: DecodedFields,
    /// Non-fatal conditions, in detection order.
    pub warnings: Vec<String>,
    /// Fatal conditions, in detection order.
    pub errors: Vec<String>,
}

impl DecodeResult {
    /// A result carrying only the given error.
    pub fn rejected(error: &DecodeError) -> Self {
        DecodeResult {
            data: DecodedFields::new(),
            warnings: Vec::new(),
            errors: vec![error.to_string()],
        }
    }

    /// Append a warning.
    pub fn warn(&mut self, warning: &DecodeWarning) {
        self.warnings.push(warning.to_string());
    }

    /// Whether the frame was decoded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
