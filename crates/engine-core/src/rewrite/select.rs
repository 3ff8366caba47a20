use crate::{
    error::RewriteError,
    pass::{PassShape, RewritePassState, classify::select_field_alias, join::JoinResolver},
};
use query_builder::ast::query::QueryPart;
use tracing::trace;

/// Rewrites `l.<field> AS <alias>` into `<join>.value AS <field>` for every
/// extended field. Runs first, so later clauses reuse these joins.
pub fn rewrite_select(
    state: &mut RewritePassState,
    resolver: &mut JoinResolver<'_>,
    shape: &PassShape<'_>,
) -> Result<(), RewriteError> {
    let lead_prefix = resolver.lead_prefix().to_string();

    for index in 0..state.select.len() {
        let Some(field_alias) = select_field_alias(&state.select[index], &lead_prefix, shape)
        else {
            continue;
        };
        let Some(field) = state.field(&field_alias).cloned() else {
            trace!("Select entry '{}' is a lead column", state.select[index]);
            continue;
        };

        let binding = resolver.resolve(state, &field_alias, &field)?;
        state.select[index] = format!("{} AS {}", binding.value_column(), field_alias);
        state.record(QueryPart::Select);
    }

    Ok(())
}
