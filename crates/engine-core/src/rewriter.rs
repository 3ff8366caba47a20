use crate::{
    error::RewriteError,
    event::{ReportEvent, ReportGraphEvent, ReportQueryEvent},
    pass::{PassShape, PassStage, RewriteOutcome, RewritePassState, join::JoinResolver},
    rewrite::{
        group_by::rewrite_group_by, order_by::rewrite_order_by, select::rewrite_select,
        where_clause::rewrite_where,
    },
};
use engine_config::settings::RewriterSettings;
use model::{field::catalog::FieldCatalog, report::filter::ReportFilter};
use query_builder::ast::query::ReportQuery;
use std::sync::Arc;
use tracing::info;

/// Rewrites report queries so references to extended lead fields read from
/// their attribute tables instead of the lead table.
///
/// Holds no per-query state: every call builds and drops its own
/// [`RewritePassState`].
pub struct ExtendedFieldRewriter {
    catalog: Arc<dyn FieldCatalog>,
    settings: RewriterSettings,
}

impl ExtendedFieldRewriter {
    pub fn new(catalog: Arc<dyn FieldCatalog>, settings: RewriterSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn settings(&self) -> &RewriterSettings {
        &self.settings
    }

    pub fn on_report_query_pre_execute(
        &self,
        event: &mut ReportQueryEvent,
    ) -> Result<RewriteOutcome, RewriteError> {
        let ReportQueryEvent {
            query,
            options,
            filters,
        } = event;
        self.rewrite(query, PassShape::RawQuery { options }, filters)
    }

    pub fn on_report_graph_generate(
        &self,
        event: &mut ReportGraphEvent,
    ) -> Result<RewriteOutcome, RewriteError> {
        let ReportGraphEvent {
            query_builder,
            filters,
        } = event;
        self.rewrite(query_builder, PassShape::Graph, filters)
    }

    pub fn dispatch(&self, event: &mut ReportEvent) -> Result<RewriteOutcome, RewriteError> {
        match event {
            ReportEvent::QueryPreExecute(event) => self.on_report_query_pre_execute(event),
            ReportEvent::GraphGenerate(event) => self.on_report_graph_generate(event),
        }
    }

    /// Runs one full pass: select, order-by (report table queries only),
    /// group-by, then where, and writes the clauses back onto `query`.
    pub fn rewrite(
        &self,
        query: &mut ReportQuery,
        shape: PassShape<'_>,
        filters: &[ReportFilter],
    ) -> Result<RewriteOutcome, RewriteError> {
        let mut state = RewritePassState::load(self.catalog.as_ref(), query, filters)?;

        let mut resolver = JoinResolver::new(query, self.catalog.as_ref(), &self.settings);

        rewrite_select(&mut state, &mut resolver, &shape)?;
        state.advance(PassStage::SelectDone);

        if shape.supports_order_by() {
            rewrite_order_by(&mut state, &mut resolver)?;
            state.advance(PassStage::OrderByDone);
        }

        rewrite_group_by(&mut state, &mut resolver)?;
        state.advance(PassStage::GroupByDone);

        rewrite_where(&mut state, &mut resolver, self.settings.where_matching)?;
        state.advance(PassStage::WhereDone);

        let outcome = state.commit(query, &shape);
        info!(
            "Extended field rewrite committed with {} join(s)",
            outcome.joins.len()
        );
        Ok(outcome)
    }
}
