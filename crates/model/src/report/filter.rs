use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// Comparison a report filter applies to its column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    Empty,
    NotEmpty,
    In,
    NotIn,
}

/// One report filter. `column` is the reference exactly as it appears in
/// the serialized where clause, e.g. `l.score`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportFilter {
    pub column: String,
    pub expr: FilterOperator,
    #[serde(default = "null_value")]
    pub value: Value,
}

fn null_value() -> Value {
    Value::Null
}

impl ReportFilter {
    pub fn new(column: &str, expr: FilterOperator, value: Value) -> Self {
        Self {
            column: column.to_string(),
            expr,
            value,
        }
    }
}
