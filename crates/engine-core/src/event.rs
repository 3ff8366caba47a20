//! The two report events the rewriter hooks into.

use model::report::{filter::ReportFilter, options::ReportOptions};
use query_builder::ast::query::ReportQuery;
use serde::{Deserialize, Serialize};

/// Raised right before a report's table query executes. Carries the report
/// column options, which map raw select expressions to output aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportQueryEvent {
    pub query: ReportQuery,
    #[serde(default)]
    pub options: ReportOptions,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
}

impl ReportQueryEvent {
    pub fn new(query: ReportQuery, options: ReportOptions, filters: Vec<ReportFilter>) -> Self {
        Self {
            query,
            options,
            filters,
        }
    }

    pub fn query(&self) -> &ReportQuery {
        &self.query
    }
}

/// Raised while a report graph's aggregate query is assembled. Graph
/// queries carry no order-by to rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportGraphEvent {
    pub query_builder: ReportQuery,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
}

impl ReportGraphEvent {
    pub fn new(query_builder: ReportQuery, filters: Vec<ReportFilter>) -> Self {
        Self {
            query_builder,
            filters,
        }
    }

    pub fn query_builder(&self) -> &ReportQuery {
        &self.query_builder
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    QueryPreExecute(ReportQueryEvent),
    GraphGenerate(ReportGraphEvent),
}

impl ReportEvent {
    pub fn query(&self) -> &ReportQuery {
        match self {
            ReportEvent::QueryPreExecute(event) => event.query(),
            ReportEvent::GraphGenerate(event) => event.query_builder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportEvent;

    #[test]
    fn test_deserialize_tagged_event() {
        let json = r#"{
            "event": "graph_generate",
            "query_builder": {"select": ["l.score AS score"], "group_by": ["l.score"]},
            "filters": [{"column": "l.score", "expr": "gt", "value": 3}]
        }"#;
        let event: ReportEvent = serde_json::from_str(json).expect("valid event");

        match &event {
            ReportEvent::GraphGenerate(graph) => assert_eq!(graph.filters.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(event.query().group_by, vec!["l.score"]);
    }
}
