use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal carried by report filters and bound into rendered predicates.
///
/// Deserialized untagged so host payloads such as `{"value": 10}` or
/// `{"value": ["a", "b"]}` map directly onto the matching variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    StringArray(Vec<String>),
    Null,
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::StringArray(v) => {
                let items = v
                    .iter()
                    .map(|s| format!("'{}'", s.replace('\'', "''")))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({items})")
            }
            Value::Json(v) => write!(f, "'{}'", v.to_string().replace('\'', "''")),
            Value::Null => write!(f, "NULL"),
        }
    }
}
