use model::error::CatalogError;
use thiserror::Error;

/// Failures that abort a rewrite pass.
///
/// References to unknown fields are not errors; they are left untouched.
#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Failed to load extended fields: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to resolve storage type for extended field '{alias}': {source}")]
    StorageType {
        alias: String,
        #[source]
        source: CatalogError,
    },

    #[error("Invalid where-clause pattern: {0}")]
    Pattern(#[from] regex::Error),
}
