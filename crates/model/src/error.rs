use thiserror::Error;

/// Errors raised while loading or querying the extended field catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read field catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog payload was not valid JSON for the expected shape.
    #[error("Failed to deserialize field catalog: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Two definitions share the same alias.
    #[error("Duplicate field alias in catalog: {0}")]
    DuplicateAlias(String),

    /// The host could not map a declared field type to a storage type.
    #[error("Cannot resolve storage type for field '{alias}' of type '{declared_type}'")]
    UnresolvableType {
        alias: String,
        declared_type: String,
    },

    /// The catalog backend is not reachable.
    #[error("Field catalog unavailable: {0}")]
    Unavailable(String),
}
