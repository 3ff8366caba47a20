use crate::{error::RewriteError, pass::RewritePassState};
use engine_config::settings::RewriterSettings;
use model::field::{
    catalog::FieldCatalog,
    definition::{FieldDefinition, Sensitivity},
    storage::StorageType,
};
use query_builder::{
    ast::{
        expr::{BinaryOperator, Expr},
        query::ReportQuery,
    },
    ident, literal, table_ref,
};
use tracing::{debug, trace};

/// The attribute table joined for one field, and the alias it was joined under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinBinding {
    pub table_name: String,
    pub join_alias: String,
}

impl JoinBinding {
    pub fn new(table_name: &str, join_alias: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            join_alias: join_alias.to_string(),
        }
    }

    /// The joined value column, e.g. `t1.value`.
    pub fn value_column(&self) -> String {
        format!("{}.value", self.join_alias)
    }
}

/// Name of the attribute table holding values of one storage type.
///
/// The format is shared with the existing storage layout and must not change.
pub fn attribute_table_name(
    prefix: &str,
    storage: StorageType,
    sensitivity: Sensitivity,
) -> String {
    format!(
        "{prefix}lead_fields_leads_{}{}_xref",
        storage.as_str(),
        sensitivity.table_suffix()
    )
}

/// Resolves field aliases to join bindings, adding a left join to the query
/// the first time a field is seen in a pass.
pub struct JoinResolver<'a> {
    query: &'a mut ReportQuery,
    catalog: &'a dyn FieldCatalog,
    settings: &'a RewriterSettings,
    lead_prefix: String,
}

impl<'a> JoinResolver<'a> {
    pub fn new(
        query: &'a mut ReportQuery,
        catalog: &'a dyn FieldCatalog,
        settings: &'a RewriterSettings,
    ) -> Self {
        Self {
            query,
            catalog,
            settings,
            lead_prefix: settings.lead_prefix(),
        }
    }

    /// The marker lead column references start with, e.g. `l.`.
    pub fn lead_prefix(&self) -> &str {
        &self.lead_prefix
    }

    /// Returns the pass binding for `field_alias`, creating the join first
    /// if the field has none yet. Callers check catalog membership.
    pub fn resolve(
        &mut self,
        state: &mut RewritePassState,
        field_alias: &str,
        field: &FieldDefinition,
    ) -> Result<JoinBinding, RewriteError> {
        if let Some(binding) = state.binding(field_alias) {
            trace!(
                "Reusing join {} for extended field '{}'",
                binding.join_alias, field_alias
            );
            return Ok(binding.clone());
        }

        let storage = self
            .catalog
            .resolve_storage_type(&field.alias, &field.field_type)
            .map_err(|source| RewriteError::StorageType {
                alias: field_alias.to_string(),
                source,
            })?;
        let table_name =
            attribute_table_name(&self.settings.table_prefix, storage, field.sensitivity);

        let (counter, join_alias) = state.counter.next();
        state.counter = counter;

        let lead = &self.settings.lead_alias;
        let on = Expr::binary(
            ident!(lead, "id"),
            BinaryOperator::Eq,
            ident!(join_alias, "lead_id"),
        )
        .and(Expr::binary(
            ident!(join_alias, "lead_field_id"),
            BinaryOperator::Eq,
            literal!(field.id),
        ));
        self.query
            .left_join(lead, table_ref!(table_name), &join_alias, on);

        debug!(
            "Joined {} as {} for extended field '{}'",
            table_name, join_alias, field_alias
        );

        let binding = JoinBinding {
            table_name,
            join_alias,
        };
        state.bind(field_alias, binding.clone());
        Ok(binding)
    }
}
