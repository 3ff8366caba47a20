use thiserror::Error;

/// Errors raised when loading or validating rewriter settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for the expected shape.
    #[error("Failed to deserialize settings: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// One or more settings hold unusable values.
    #[error("Settings validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
