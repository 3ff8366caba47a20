//! Turns report filters into where-clause predicates.

use crate::ast::expr::{BinaryOperator, Expr, Ident};
use model::{
    core::value::Value,
    report::filter::{FilterOperator, ReportFilter},
};

/// Conjunction of all filters, or `None` when there are none.
pub fn filters_predicate(filters: &[ReportFilter]) -> Option<Expr> {
    filters
        .iter()
        .map(filter_predicate)
        .reduce(|acc, expr| acc.and(expr))
}

pub fn filter_predicate(filter: &ReportFilter) -> Expr {
    let column = || Expr::Identifier(Ident::parse(&filter.column));
    let compare = |op: BinaryOperator| Expr::binary(column(), op, Expr::Value(filter.value.clone()));
    let empty_string = || Expr::Value(Value::String(String::new()));

    match filter.expr {
        FilterOperator::Eq => compare(BinaryOperator::Eq),
        FilterOperator::Neq => compare(BinaryOperator::NotEq),
        FilterOperator::Gt => compare(BinaryOperator::Gt),
        FilterOperator::Gte => compare(BinaryOperator::GtEq),
        FilterOperator::Lt => compare(BinaryOperator::Lt),
        FilterOperator::Lte => compare(BinaryOperator::LtEq),
        FilterOperator::Like => compare(BinaryOperator::Like),
        FilterOperator::NotLike => compare(BinaryOperator::NotLike),
        FilterOperator::Empty => Expr::IsNull {
            expr: Box::new(column()),
            negated: false,
        }
        .or(Expr::binary(column(), BinaryOperator::Eq, empty_string())),
        FilterOperator::NotEmpty => Expr::IsNull {
            expr: Box::new(column()),
            negated: true,
        }
        .and(Expr::binary(column(), BinaryOperator::NotEq, empty_string())),
        FilterOperator::In | FilterOperator::NotIn => Expr::InList {
            expr: Box::new(column()),
            list: list_items(&filter.value),
            negated: filter.expr == FilterOperator::NotIn,
        },
    }
}

fn list_items(value: &Value) -> Vec<Expr> {
    match value {
        Value::StringArray(items) => items
            .iter()
            .map(|item| Expr::Value(Value::String(item.clone())))
            .collect(),
        Value::Json(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| Expr::Value(Value::Json(item.clone())))
            .collect(),
        Value::Null => Vec::new(),
        other => vec![Expr::Value(other.clone())],
    }
}
