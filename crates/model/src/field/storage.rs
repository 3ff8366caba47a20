//! Maps declared field types onto the column family of their attribute table.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Physical value column family. Each one owns a
/// `lead_fields_leads_<type>[_secure]_xref` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Boolean,
    Date,
    DateTime,
    Time,
    Float,
    String,
    Text,
}

lazy_static! {
    static ref DECLARED_TYPE_MAP: HashMap<&'static str, StorageType> = build_declared_type_map();
}

impl StorageType {
    /// Resolves the storage type for a declared field type.
    ///
    /// Plain `text` fields are stored as `string` unless the alias marks
    /// them as a description. Unknown types fall back to `text`.
    pub fn for_declared(alias: &str, declared_type: &str) -> Self {
        let normalized = declared_type.trim().to_lowercase();
        if normalized == "text" {
            return if alias.contains("description") {
                StorageType::Text
            } else {
                StorageType::String
            };
        }

        DECLARED_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .unwrap_or(StorageType::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Boolean => "boolean",
            StorageType::Date => "date",
            StorageType::DateTime => "datetime",
            StorageType::Time => "time",
            StorageType::Float => "float",
            StorageType::String => "string",
            StorageType::Text => "text",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn build_declared_type_map() -> HashMap<&'static str, StorageType> {
    let mut map = HashMap::new();

    map.insert("boolean", StorageType::Boolean);
    map.insert("date", StorageType::Date);
    map.insert("datetime", StorageType::DateTime);
    map.insert("time", StorageType::Time);
    map.insert("number", StorageType::Float);

    for declared in [
        "timezone", "locale", "country", "email", "lookup", "select", "region", "tel",
    ] {
        map.insert(declared, StorageType::String);
    }

    map
}
