//! Provides a type-safe, fluent builder for constructing `ReportQuery` values.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct SQL order at compile time.

use crate::{
    ast::{
        common::{JoinKind, OrderDir, TableRef},
        expr::Expr,
        query::{FromClause, JoinClause, ReportQuery},
    },
    build::filter::filters_predicate,
};
use model::report::filter::ReportFilter;

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct ReportQueryBuilder<State> {
    ast: ReportQuery,
    state: State,
}

impl Default for ReportQueryBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl ReportQueryBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: ReportQuery::default(),
            state: InitialState,
        }
    }

    /// Adds the select fragments. This is the entry point for building a query.
    pub fn select(mut self, columns: &[&str]) -> ReportQueryBuilder<SelectState> {
        self.ast.select = columns.iter().map(|c| c.to_string()).collect();
        ReportQueryBuilder {
            ast: self.ast,
            state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl ReportQueryBuilder<SelectState> {
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> ReportQueryBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(String::from),
        });
        ReportQueryBuilder {
            ast: self.ast,
            state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, we can add optional clauses like `JOIN`, `WHERE`, etc.
impl ReportQueryBuilder<FromState> {
    pub fn join(
        mut self,
        kind: JoinKind,
        from_alias: &str,
        table: TableRef,
        alias: Option<&str>,
        on: Expr,
    ) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            from_alias: from_alias.to_string(),
            table,
            alias: alias.map(String::from),
            on,
        });
        self
    }

    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(condition);
        self
    }

    /// Sets the where clause to the conjunction of the report filters.
    /// An empty filter list leaves the clause unset.
    pub fn filters(mut self, filters: &[ReportFilter]) -> Self {
        self.ast.where_clause = filters_predicate(filters);
        self
    }

    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.ast
            .group_by
            .extend(columns.iter().map(|c| c.to_string()));
        self
    }

    /// Adds an order-by fragment such as `l.score DESC`.
    pub fn order_by(mut self, column: &str, direction: Option<OrderDir>) -> Self {
        let part = match direction {
            Some(dir) => format!("{column} {dir}"),
            None => column.to_string(),
        };
        self.ast.order_by.push(part);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.ast.offset = Some(offset);
        self
    }

    /// Finalizes and returns the constructed `ReportQuery`.
    pub fn build(self) -> ReportQuery {
        self.ast
    }
}
