use engine_config::settings::error::SettingsError;
use engine_core::error::RewriteError;
use model::error::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the event file: {0}")]
    EventFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the event file: {0}")]
    EventDeserialize(#[from] serde_json::Error),

    #[error("Failed to load the field catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid rewriter settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to rewrite the report query: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
