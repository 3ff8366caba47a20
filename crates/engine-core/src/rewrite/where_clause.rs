use crate::{
    error::RewriteError,
    pass::{
        RewritePassState,
        classify::filter_field_alias,
        join::{JoinBinding, JoinResolver},
    },
};
use engine_config::settings::WhereMatching;
use query_builder::ast::{
    expr::{Expr, Ident},
    query::QueryPart,
};
use regex::{Captures, Regex};
use tracing::trace;

/// Rewrites where-clause references for every filter on an extended field.
///
/// The filter's `column` is the reference exactly as it appears in the
/// clause. Identifier nodes equal to it are replaced structurally; raw
/// [`Expr::Literal`] text is substituted according to `matching`.
pub fn rewrite_where(
    state: &mut RewritePassState,
    resolver: &mut JoinResolver<'_>,
    matching: WhereMatching,
) -> Result<(), RewriteError> {
    let lead_prefix = resolver.lead_prefix().to_string();
    let filters = state.filters.clone();

    for filter in &filters {
        let Some(field_alias) = filter_field_alias(&filter.column, &lead_prefix) else {
            continue;
        };
        let Some(field) = state.field(field_alias).cloned() else {
            trace!("Filter column '{}' is a lead column", filter.column);
            continue;
        };

        let binding = resolver.resolve(state, field_alias, &field)?;
        if let Some(condition) = state.where_clause.as_mut() {
            replace_column(condition, &filter.column, &binding, matching)?;
        }
        state.record(QueryPart::Where);
    }

    Ok(())
}

fn replace_column(
    condition: &mut Expr,
    column: &str,
    binding: &JoinBinding,
    matching: WhereMatching,
) -> Result<(), RewriteError> {
    let pattern = ColumnPattern::new(column, matching)?;
    let replacement = binding.value_column();

    condition.walk_mut(&mut |node: &mut Expr| match node {
        Expr::Identifier(ident) if ident.to_string() == column => {
            *ident = Ident {
                qualifier: Some(binding.join_alias.clone()),
                name: "value".to_string(),
            };
        }
        Expr::Literal(sql) => {
            *sql = pattern.replace_all(sql, &replacement);
        }
        _ => {}
    });

    Ok(())
}

enum ColumnPattern<'c> {
    Literal(&'c str),
    Boundary(Regex),
}

impl<'c> ColumnPattern<'c> {
    fn new(column: &'c str, matching: WhereMatching) -> Result<Self, regex::Error> {
        match matching {
            WhereMatching::Literal => Ok(ColumnPattern::Literal(column)),
            WhereMatching::Boundary => {
                // The leading group consumes one non-identifier character (or
                // the start); the trailing check is zero-width so adjacent
                // references separated by one character both match.
                let ends_in_word = column
                    .chars()
                    .last()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_');
                let trailing = if ends_in_word { r"\b" } else { "" };
                let pattern = format!(r"(^|[^\w.]){}{}", regex::escape(column), trailing);
                Regex::new(&pattern).map(ColumnPattern::Boundary)
            }
        }
    }

    fn replace_all(&self, text: &str, replacement: &str) -> String {
        match self {
            ColumnPattern::Literal(column) => text.replace(column, replacement),
            ColumnPattern::Boundary(re) => re
                .replace_all(text, |caps: &Captures| format!("{}{}", &caps[1], replacement))
                .into_owned(),
        }
    }
}
