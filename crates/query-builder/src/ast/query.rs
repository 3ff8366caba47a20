//! Defines the report query descriptor that the rewriter mutates.
//!
//! Select, group-by and order-by entries are kept as SQL fragments, the way
//! the reporting layer assembles them. The where clause is an expression
//! tree, which may itself hold raw fragments as [`Expr::Literal`] nodes.

use crate::ast::{
    common::{JoinKind, TableRef},
    expr::Expr,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Select fragments, e.g. `l.email AS email`.
    #[serde(default)]
    pub select: Vec<String>,

    /// The primary table, e.g. `FROM leads l`.
    #[serde(default)]
    pub from: Option<FromClause>,

    /// Joins in insertion order.
    #[serde(default)]
    pub joins: Vec<JoinClause>,

    #[serde(default)]
    pub where_clause: Option<Expr>,

    #[serde(default)]
    pub group_by: Vec<String>,

    /// Order-by fragments, e.g. `l.score DESC`.
    #[serde(default)]
    pub order_by: Vec<String>,

    #[serde(default)]
    pub limit: Option<u64>,

    #[serde(default)]
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromClause {
    pub table: TableRef,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinClause {
    pub kind: JoinKind,
    /// Alias of the table this join hangs off.
    pub from_alias: String,
    pub table: TableRef,
    pub alias: Option<String>,
    /// The join condition, e.g. `ON l.id = t1.lead_id`.
    pub on: Expr,
}

/// The clause kinds a report query exposes for inspection and replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPart {
    Select,
    OrderBy,
    GroupBy,
    Where,
}

impl fmt::Display for QueryPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryPart::Select => "select",
            QueryPart::OrderBy => "orderBy",
            QueryPart::GroupBy => "groupBy",
            QueryPart::Where => "where",
        };
        f.write_str(name)
    }
}

impl ReportQuery {
    pub fn select_parts(&self) -> &[String] {
        &self.select
    }

    pub fn set_select(&mut self, parts: Vec<String>) {
        self.select = parts;
    }

    pub fn order_by_parts(&self) -> &[String] {
        &self.order_by
    }

    /// Replaces the whole order-by clause with one expression.
    pub fn set_order_by(&mut self, expr: String) {
        self.order_by = if expr.is_empty() { Vec::new() } else { vec![expr] };
    }

    pub fn group_by_parts(&self) -> &[String] {
        &self.group_by
    }

    pub fn set_group_by(&mut self, parts: Vec<String>) {
        self.group_by = parts;
    }

    pub fn where_clause(&self) -> Option<&Expr> {
        self.where_clause.as_ref()
    }

    pub fn set_where(&mut self, condition: Option<Expr>) {
        self.where_clause = condition;
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    /// Appends a `LEFT JOIN` hanging off `from_alias`. Existing joins are
    /// never reordered.
    pub fn left_join(&mut self, from_alias: &str, table: TableRef, alias: &str, on: Expr) {
        self.joins.push(JoinClause {
            kind: JoinKind::Left,
            from_alias: from_alias.to_string(),
            table,
            alias: Some(alias.to_string()),
            on,
        });
    }

    /// Alias of the primary table, if any.
    pub fn root_alias(&self) -> Option<&str> {
        self.from.as_ref().and_then(|from| from.alias.as_deref())
    }
}
