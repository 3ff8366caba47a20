use crate::{
    error::CatalogError,
    field::{
        definition::{FieldDefinition, FieldMap},
        storage::StorageType,
    },
};
use std::path::Path;
use tracing::debug;

/// Read-only source of extended field definitions.
///
/// A rewrite pass calls [`FieldCatalog::extended_fields`] at most once and
/// [`FieldCatalog::resolve_storage_type`] once per newly joined field.
pub trait FieldCatalog: Send + Sync {
    fn extended_fields(&self) -> Result<FieldMap, CatalogError>;

    /// Maps a field's declared type to its storage column family.
    fn resolve_storage_type(
        &self,
        alias: &str,
        declared_type: &str,
    ) -> Result<StorageType, CatalogError> {
        Ok(StorageType::for_declared(alias, declared_type))
    }
}

/// Catalog backed by a fixed set of definitions, typically loaded from a
/// JSON export of the host's field list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    fields: FieldMap,
}

impl InMemoryCatalog {
    pub fn new(definitions: Vec<FieldDefinition>) -> Result<Self, CatalogError> {
        let mut fields = FieldMap::with_capacity(definitions.len());
        for def in definitions {
            if fields.contains_key(&def.alias) {
                return Err(CatalogError::DuplicateAlias(def.alias));
            }
            fields.insert(def.alias.clone(), def);
        }
        Ok(Self { fields })
    }

    /// Parses a JSON array of field definitions.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<FieldDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        debug!(
            "Loaded {} extended fields from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, alias: &str) -> Option<&FieldDefinition> {
        self.fields.get(alias)
    }

    /// Definitions ordered by alias.
    pub fn definitions(&self) -> Vec<&FieldDefinition> {
        let mut defs = self.fields.values().collect::<Vec<_>>();
        defs.sort_by(|a, b| a.alias.cmp(&b.alias));
        defs
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldCatalog for InMemoryCatalog {
    fn extended_fields(&self) -> Result<FieldMap, CatalogError> {
        Ok(self.fields.clone())
    }
}
