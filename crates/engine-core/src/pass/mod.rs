//! Per-invocation state shared by the clause rewriters.

use crate::{error::RewriteError, pass::alias::AliasCounter, pass::join::JoinBinding};
use model::{
    field::{
        catalog::FieldCatalog,
        definition::{FieldDefinition, FieldMap},
    },
    report::{filter::ReportFilter, options::ReportOptions},
};
use query_builder::ast::{
    expr::Expr,
    query::{QueryPart, ReportQuery},
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub mod alias;
pub mod classify;
pub mod join;

/// The host invocation a pass runs for, resolved once at pass entry.
#[derive(Debug, Clone, Copy)]
pub enum PassShape<'a> {
    /// Report table query: select aliases come from the column options and
    /// the order-by clause is rewritten.
    RawQuery { options: &'a ReportOptions },
    /// Graph aggregate query: select aliases are read after `AS`, no order-by.
    Graph,
}

impl PassShape<'_> {
    pub fn supports_order_by(&self) -> bool {
        matches!(self, PassShape::RawQuery { .. })
    }
}

/// Progress of a pass. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PassStage {
    Idle,
    CatalogLoaded,
    SelectDone,
    OrderByDone,
    GroupByDone,
    WhereDone,
    Committed,
}

/// One join created during a pass, in allocation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedJoin {
    pub field_alias: String,
    pub table_name: String,
    pub join_alias: String,
}

/// What a committed pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    pub joins: Vec<ResolvedJoin>,
    /// Entries rewritten per clause; for `where`, the filters applied.
    pub rewritten: BTreeMap<QueryPart, usize>,
}

impl RewriteOutcome {
    /// True when the pass left the query untouched.
    pub fn is_identity(&self) -> bool {
        self.joins.is_empty() && self.rewritten.values().all(|n| *n == 0)
    }
}

/// Everything one rewrite pass mutates. Built fresh for every invocation
/// and dropped once the clauses are written back.
#[derive(Debug)]
pub struct RewritePassState {
    fields: FieldMap,
    bindings: HashMap<String, JoinBinding>,
    allocation_order: Vec<String>,
    pub(crate) counter: AliasCounter,
    stage: PassStage,
    rewritten: BTreeMap<QueryPart, usize>,

    pub select: Vec<String>,
    pub order_by: Vec<String>,
    pub group_by: Vec<String>,
    pub where_clause: Option<Expr>,
    pub filters: Vec<ReportFilter>,
}

impl RewritePassState {
    fn idle(query: &ReportQuery, filters: &[ReportFilter]) -> Self {
        Self {
            fields: FieldMap::new(),
            bindings: HashMap::new(),
            allocation_order: Vec::new(),
            counter: AliasCounter::default(),
            stage: PassStage::Idle,
            rewritten: BTreeMap::new(),
            select: query.select_parts().to_vec(),
            order_by: query.order_by_parts().to_vec(),
            group_by: query.group_by_parts().to_vec(),
            where_clause: query.where_clause().cloned(),
            filters: filters.to_vec(),
        }
    }

    /// Snapshots the query clauses and loads the catalog once.
    pub fn load(
        catalog: &dyn FieldCatalog,
        query: &ReportQuery,
        filters: &[ReportFilter],
    ) -> Result<Self, RewriteError> {
        let mut state = Self::idle(query, filters);
        state.fields = catalog.extended_fields()?;
        state.advance(PassStage::CatalogLoaded);
        Ok(state)
    }

    pub fn stage(&self) -> PassStage {
        self.stage
    }

    pub fn advance(&mut self, next: PassStage) {
        debug_assert!(
            next > self.stage,
            "pass stage moved backwards: {:?} -> {:?}",
            self.stage,
            next
        );
        debug!("Rewrite pass stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    pub fn field(&self, alias: &str) -> Option<&FieldDefinition> {
        self.fields.get(alias)
    }

    pub fn binding(&self, alias: &str) -> Option<&JoinBinding> {
        self.bindings.get(alias)
    }

    pub(crate) fn bind(&mut self, alias: &str, binding: JoinBinding) {
        self.allocation_order.push(alias.to_string());
        self.bindings.insert(alias.to_string(), binding);
    }

    pub(crate) fn record(&mut self, part: QueryPart) {
        *self.rewritten.entry(part).or_insert(0) += 1;
    }

    /// Writes the rewritten clauses back. Joins were added to the query as
    /// they were resolved.
    pub fn commit(mut self, query: &mut ReportQuery, shape: &PassShape<'_>) -> RewriteOutcome {
        query.set_select(std::mem::take(&mut self.select));

        if shape.supports_order_by() {
            let parts = self
                .order_by
                .iter()
                .filter(|part| !part.is_empty())
                .cloned()
                .collect::<Vec<_>>();
            if !parts.is_empty() {
                query.set_order_by(parts.join(","));
            }
        }

        if !self.group_by.is_empty() {
            query.set_group_by(std::mem::take(&mut self.group_by));
        }

        query.set_where(self.where_clause.take());
        self.advance(PassStage::Committed);

        let joins = self
            .allocation_order
            .iter()
            .filter_map(|alias| {
                self.bindings.get(alias).map(|binding| ResolvedJoin {
                    field_alias: alias.clone(),
                    table_name: binding.table_name.clone(),
                    join_alias: binding.join_alias.clone(),
                })
            })
            .collect();

        RewriteOutcome {
            joins,
            rewritten: self.rewritten,
        }
    }
}
