use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

use crate::data::type_inference::{InferredType, TypeInference};

/// A single cell value in a row
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(String), // Kept as the source string; parsed on demand
    Null,
}

impl DataValue {
    /// Build a value from raw text, inferring its type
    pub fn from_string(s: &str) -> Self {
        match TypeInference::infer_from_string(s) {
            InferredType::Null => DataValue::Null,
            InferredType::Boolean => DataValue::Boolean(s.eq_ignore_ascii_case("true")),
            InferredType::Integer => s
                .parse::<i64>()
                .map(DataValue::Integer)
                .unwrap_or_else(|_| DataValue::String(s.to_string())),
            InferredType::Float => s
                .parse::<f64>()
                .map(DataValue::Float)
                .unwrap_or_else(|_| DataValue::String(s.to_string())),
            InferredType::DateTime => DataValue::DateTime(s.to_string()),
            InferredType::String => DataValue::String(s.to_string()),
        }
    }

    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => DataValue::Null,
            JsonValue::Bool(b) => DataValue::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    DataValue::Float(f)
                } else {
                    DataValue::String(n.to_string())
                }
            }
            JsonValue::String(s) => {
                if TypeInference::looks_like_datetime(s) {
                    DataValue::DateTime(s.clone())
                } else {
                    DataValue::String(s.clone())
                }
            }
            // Nested structures are kept as their JSON text
            JsonValue::Array(_) | JsonValue::Object(_) => DataValue::String(json.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Numeric view of the value, accepting numeric-looking text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Integer(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            DataValue::String(s) => TypeInference::parse_numeric(s),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::DateTime(dt) => write!(f, "{}", dt),
            DataValue::Null => write!(f, ""),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Integer(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Boolean(b)
    }
}

/// One record of a dataset: field name to value.
///
/// The engine treats rows as opaque and never mutates them; it only keeps
/// indices into the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    fields: BTreeMap<String, DataValue>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion, mostly for fixtures
    pub fn with(mut self, field: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: DataValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&DataValue> {
        self.fields.get(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert a JSON object into a row. Non-objects yield `None`.
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        let obj = json.as_object()?;
        let fields = obj
            .iter()
            .map(|(key, value)| (key.clone(), DataValue::from_json(value)))
            .collect();
        Some(Self { fields })
    }
}

impl FromIterator<(String, DataValue)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (String, DataValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
