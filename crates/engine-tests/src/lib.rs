#![allow(dead_code)]

use engine_config::settings::RewriterSettings;
use engine_core::{
    error::RewriteError,
    event::{ReportGraphEvent, ReportQueryEvent},
    pass::RewriteOutcome,
    rewriter::ExtendedFieldRewriter,
};
use model::field::catalog::InMemoryCatalog;
use std::{io::Write, sync::Arc};
use tempfile::NamedTempFile;

pub mod integration;
pub mod utils;

/// Catalog loaded from [`utils::FIELDS_JSON`].
pub fn test_catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_json_str(utils::FIELDS_JSON).expect("valid catalog fixture")
}

pub fn rewriter_with(settings: RewriterSettings) -> ExtendedFieldRewriter {
    ExtendedFieldRewriter::new(Arc::new(test_catalog()), settings)
}

pub fn rewriter() -> ExtendedFieldRewriter {
    rewriter_with(RewriterSettings::default())
}

pub fn run_query_event(
    rewriter: &ExtendedFieldRewriter,
    event: &mut ReportQueryEvent,
) -> Result<RewriteOutcome, RewriteError> {
    rewriter.on_report_query_pre_execute(event)
}

pub fn run_graph_event(
    rewriter: &ExtendedFieldRewriter,
    event: &mut ReportGraphEvent,
) -> Result<RewriteOutcome, RewriteError> {
    rewriter.on_report_graph_generate(event)
}

/// Writes `contents` to a temporary file that lives as long as the handle.
pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
