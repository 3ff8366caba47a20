//! Picks lead column references out of clause entries.
//!
//! An entry is a candidate when it starts with the lead prefix (`l.`). The
//! extracted alias still has to be checked against the field catalog; a
//! miss means a physical lead column.

use crate::pass::PassShape;

const SELECT_ALIAS_SEPARATOR: &str = " AS ";

/// Alias of a select entry such as `l.favorite_color AS favorite_color`.
///
/// Report table queries look the raw expression up in the column options;
/// graph queries take the text after `AS`.
pub fn select_field_alias(entry: &str, lead_prefix: &str, shape: &PassShape<'_>) -> Option<String> {
    if !entry.starts_with(lead_prefix) {
        return None;
    }

    let mut parts = entry.split(SELECT_ALIAS_SEPARATOR);
    let expr = parts.next()?;
    match shape {
        PassShape::RawQuery { options } => options.column_alias(expr).map(str::to_string),
        PassShape::Graph => parts.next().map(|alias| alias.trim().to_string()),
    }
}

/// Alias of an order-by entry such as `l.score DESC`.
pub fn order_by_field_alias<'e>(entry: &'e str, lead_prefix: &str) -> Option<&'e str> {
    let column = entry.split(' ').next()?;
    column.strip_prefix(lead_prefix)
}

/// Alias of a group-by entry such as `l.score`.
pub fn group_by_field_alias<'e>(entry: &'e str, lead_prefix: &str) -> Option<&'e str> {
    entry.strip_prefix(lead_prefix)
}

/// Alias of a filter column such as `l.score`.
pub fn filter_field_alias<'e>(column: &'e str, lead_prefix: &str) -> Option<&'e str> {
    column.strip_prefix(lead_prefix)
}
