#![allow(dead_code)]

use engine_core::event::{ReportGraphEvent, ReportQueryEvent};
use model::{
    core::value::Value,
    report::{
        filter::{FilterOperator, ReportFilter},
        options::ReportOptions,
    },
};
use query_builder::{
    ast::{common::OrderDir, expr::Expr, query::ReportQuery},
    build::query::ReportQueryBuilder,
    dialect::MySql,
    render::to_sql,
    table_ref,
};

/// Host catalog export used across scenarios.
pub const FIELDS_JSON: &str = r#"[
    {"id": 4, "alias": "favorite_color", "type": "text", "object": "extendedField"},
    {"id": 7, "alias": "score", "type": "number", "object": "extendedField"},
    {"id": 9, "alias": "ssn", "type": "textarea", "object": "extendedFieldSecure"},
    {"id": 11, "alias": "signup_date", "type": "date"}
]"#;

/// A report table event selecting lead columns mixed with extended fields.
pub const QUERY_EVENT_JSON: &str = r#"{
    "event": "query_pre_execute",
    "query": {
        "select": ["l.id AS id", "l.favorite_color AS favorite_color"],
        "from": {"table": {"name": "leads"}, "alias": "l"},
        "order_by": ["l.favorite_color DESC"],
        "where_clause": {"literal": "l.score > 10"}
    },
    "options": {
        "columns": {
            "l.id": {"alias": "id", "label": "ID", "type": "int"},
            "l.favorite_color": {"alias": "favorite_color", "label": "Color", "type": "string"}
        }
    },
    "filters": [{"column": "l.score", "expr": "gt", "value": 10}]
}"#;

pub fn filter(column: &str, expr: FilterOperator, value: Value) -> ReportFilter {
    ReportFilter::new(column, expr, value)
}

/// Builds a lead report query over `leads l`.
pub fn lead_query(
    select: &[&str],
    order_by: &[(&str, OrderDir)],
    group_by: &[&str],
    where_clause: Option<Expr>,
) -> ReportQuery {
    let mut builder = ReportQueryBuilder::new()
        .select(select)
        .from(table_ref!("leads"), Some("l"));
    if let Some(condition) = where_clause {
        builder = builder.where_clause(condition);
    }
    if !group_by.is_empty() {
        builder = builder.group_by(group_by);
    }
    for (column, dir) in order_by {
        builder = builder.order_by(column, Some(*dir));
    }
    builder.build()
}

/// Column options mapping each raw `l.<alias>` select expression to `<alias>`.
pub fn options_for(aliases: &[&str]) -> ReportOptions {
    aliases.iter().fold(ReportOptions::default(), |options, alias| {
        options.with_column(&format!("l.{alias}"), alias)
    })
}

pub fn query_event(
    query: ReportQuery,
    aliases: &[&str],
    filters: Vec<ReportFilter>,
) -> ReportQueryEvent {
    ReportQueryEvent::new(query, options_for(aliases), filters)
}

pub fn graph_event(query: ReportQuery, filters: Vec<ReportFilter>) -> ReportGraphEvent {
    ReportGraphEvent::new(query, filters)
}

pub fn mysql(query: &ReportQuery) -> (String, Vec<Value>) {
    to_sql(query, &MySql)
}
