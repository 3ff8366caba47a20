use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Report column metadata, keyed in [`ReportOptions::columns`] by the raw
/// select expression (for example `l.favorite_color`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnOption {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportOptions {
    #[serde(default)]
    pub columns: HashMap<String, ColumnOption>,
}

impl ReportOptions {
    pub fn with_column(mut self, expr: &str, alias: &str) -> Self {
        self.columns.insert(
            expr.to_string(),
            ColumnOption {
                alias: alias.to_string(),
                label: None,
                column_type: None,
            },
        );
        self
    }

    /// Alias registered for a raw select expression.
    pub fn column_alias(&self, expr: &str) -> Option<&str> {
        self.columns.get(expr).map(|c| c.alias.as_str())
    }
}
