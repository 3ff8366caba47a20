use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extended field definitions keyed by alias.
pub type FieldMap = HashMap<String, FieldDefinition>;

/// Selects between the regular attribute tables and their `_secure` twins.
///
/// Host catalog exports carry this as the field's `object`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sensitivity {
    #[default]
    #[serde(rename = "extendedField")]
    Standard,
    #[serde(rename = "extendedFieldSecure")]
    Secure,
}

impl Sensitivity {
    /// Table name suffix for this class.
    pub fn table_suffix(&self) -> &'static str {
        match self {
            Sensitivity::Standard => "",
            Sensitivity::Secure => "_secure",
        }
    }
}

/// Catalog entry for one virtual lead attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Attribute row key stored in `lead_field_id`.
    pub id: i64,
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Declared field type, e.g. `text`, `number`, `select`.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(rename = "object", default)]
    pub sensitivity: Sensitivity,
}

impl FieldDefinition {
    pub fn new(id: i64, alias: &str, field_type: &str, sensitivity: Sensitivity) -> Self {
        Self {
            id,
            alias: alias.to_string(),
            label: None,
            field_type: field_type.to_string(),
            sensitivity,
        }
    }

    pub fn is_secure(&self) -> bool {
        self.sensitivity == Sensitivity::Secure
    }
}
