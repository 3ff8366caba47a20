use crate::{commands::DialectKind, error::CliError};
use engine_config::settings::RewriterSettings;
use engine_core::{event::ReportEvent, pass::RewriteOutcome, pass::join::attribute_table_name};
use model::field::catalog::{FieldCatalog, InMemoryCatalog};
use query_builder::{
    dialect::{Dialect, MySql, Postgres},
    render::to_sql,
};
use serde::Serialize;

#[derive(Serialize)]
struct RewriteReport<'a> {
    event: &'a ReportEvent,
    outcome: &'a RewriteOutcome,
}

pub fn dialect_for(kind: DialectKind) -> Box<dyn Dialect> {
    match kind {
        DialectKind::MySql => Box::new(MySql),
        DialectKind::Postgres => Box::new(Postgres),
    }
}

/// Renders the rewritten query followed by its bound parameters, one per line.
pub fn render_sql(event: &ReportEvent, dialect: &dyn Dialect) -> String {
    let (sql, params) = to_sql(event.query(), dialect);
    let mut out = sql;
    for (idx, param) in params.iter().enumerate() {
        out.push_str(&format!("\n-- {}: {}", dialect.get_placeholder(idx), param));
    }
    out
}

pub fn render_json(event: &ReportEvent, outcome: &RewriteOutcome) -> Result<String, CliError> {
    serde_json::to_string_pretty(&RewriteReport { event, outcome })
        .map_err(CliError::JsonSerialize)
}

/// One line per catalog field: alias, declared type and attribute table.
pub fn render_tables(
    catalog: &InMemoryCatalog,
    settings: &RewriterSettings,
) -> Result<String, CliError> {
    let mut lines = Vec::with_capacity(catalog.len());
    for def in catalog.definitions() {
        let storage = catalog.resolve_storage_type(&def.alias, &def.field_type)?;
        let table = attribute_table_name(&settings.table_prefix, storage, def.sensitivity);
        lines.push(format!("{:<24} {:<12} {}", def.alias, def.field_type, table));
    }
    Ok(lines.join("\n"))
}
