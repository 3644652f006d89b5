//! Row model shared by the parser, reconciler, and exporter

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value
///
/// Records are heterogeneous: each field holds one of these small
/// tagged scalars. Nested JSON values are stored as their compact JSON
/// text so that comparison stays shallow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a cell value from a parsed JSON value. Objects and arrays
    /// become their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            nested => Value::Text(nested.to_string()),
        }
    }

    /// String rendition used for key indexing and cell serialization.
    /// Null renders empty; whole numbers render without a fractional
    /// part so numeric and text sources agree on key text.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A flat mapping from field name to cell value. Field sets may differ
/// between records of the same table; insertion order is preserved and
/// equality is order-insensitive map equality.
pub type Record = IndexMap<String, Value>;

/// Result of parsing one tabular source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedTable {
    pub records: Vec<Record>,
    /// Union of observed field names in order of first appearance,
    /// sampled from at most the first `FIELD_SAMPLE_LIMIT` records.
    /// May be a strict superset of any single record's fields.
    pub field_names: Vec<String>,
    pub source_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<TableMeta>,
}

/// Format details observed while parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl ParsedTable {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_names.iter().any(|f| f == name)
    }
}
