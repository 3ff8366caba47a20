use crate::{
    error::RewriteError,
    pass::{RewritePassState, classify::order_by_field_alias, join::JoinResolver},
};
use query_builder::ast::query::QueryPart;
use tracing::trace;

/// Rewrites the column of each extended-field order-by entry, keeping the
/// direction. A field already joined by the select pass is ordered by its
/// output alias; otherwise a join is added and `<join>.value` is used.
pub fn rewrite_order_by(
    state: &mut RewritePassState,
    resolver: &mut JoinResolver<'_>,
) -> Result<(), RewriteError> {
    let lead_prefix = resolver.lead_prefix().to_string();

    for index in 0..state.order_by.len() {
        let Some(field_alias) =
            order_by_field_alias(&state.order_by[index], &lead_prefix).map(str::to_string)
        else {
            continue;
        };
        let Some(field) = state.field(&field_alias).cloned() else {
            trace!("Order-by entry '{}' is a lead column", state.order_by[index]);
            continue;
        };

        let column_len = lead_prefix.len() + field_alias.len();
        let direction = state.order_by[index][column_len..].to_string();

        let column = if state.binding(&field_alias).is_some() {
            field_alias.clone()
        } else {
            resolver.resolve(state, &field_alias, &field)?.value_column()
        };

        state.order_by[index] = format!("{column}{direction}");
        state.record(QueryPart::OrderBy);
    }

    Ok(())
}
