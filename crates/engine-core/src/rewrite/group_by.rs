use crate::{
    error::RewriteError,
    pass::{RewritePassState, classify::group_by_field_alias, join::JoinResolver},
};
use query_builder::ast::query::QueryPart;
use tracing::trace;

/// Rewrites extended-field group-by entries to `<join>.value`. Grouping
/// always uses the qualified column, never the select output alias.
pub fn rewrite_group_by(
    state: &mut RewritePassState,
    resolver: &mut JoinResolver<'_>,
) -> Result<(), RewriteError> {
    let lead_prefix = resolver.lead_prefix().to_string();

    for index in 0..state.group_by.len() {
        let Some(field_alias) =
            group_by_field_alias(&state.group_by[index], &lead_prefix).map(str::to_string)
        else {
            continue;
        };
        let Some(field) = state.field(&field_alias).cloned() else {
            trace!("Group-by entry '{}' is a lead column", state.group_by[index]);
            continue;
        };

        let binding = resolver.resolve(state, &field_alias, &field)?;
        state.group_by[index] = binding.value_column();
        state.record(QueryPart::GroupBy);
    }

    Ok(())
}
