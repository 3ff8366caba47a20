use crate::settings::{error::SettingsError, validator::SettingsValidator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub mod error;
pub mod validator;

/// Environment variable overriding [`RewriterSettings::table_prefix`].
pub const TABLE_PREFIX_ENV: &str = "XFIELD_TABLE_PREFIX";
/// Environment variable overriding [`RewriterSettings::lead_alias`].
pub const LEAD_ALIAS_ENV: &str = "XFIELD_LEAD_ALIAS";

/// How filter columns are located inside raw where-clause text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhereMatching {
    /// Match only whole references: the occurrence may not be preceded by an
    /// identifier character or `.`, nor followed by an identifier character.
    #[default]
    Boundary,
    /// Replace every substring occurrence.
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterSettings {
    /// Prefix of every host table, e.g. `mautic_`.
    pub table_prefix: String,
    /// Alias of the lead table in report queries.
    pub lead_alias: String,
    pub where_matching: WhereMatching,
}

impl Default for RewriterSettings {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            lead_alias: "l".to_string(),
            where_matching: WhereMatching::Boundary,
        }
    }
}

impl RewriterSettings {
    /// Loads settings from a JSON file. Missing keys take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: RewriterSettings = serde_json::from_str(&json)?;
        info!("Loaded rewriter settings from {}", path.display());
        Ok(settings)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup(TABLE_PREFIX_ENV) {
            self.table_prefix = prefix;
        }
        if let Some(alias) = lookup(LEAD_ALIAS_ENV) {
            self.lead_alias = alias;
        }
        self
    }

    /// The marker a lead column reference starts with, e.g. `l.`.
    pub fn lead_prefix(&self) -> String {
        format!("{}.", self.lead_alias)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        SettingsValidator::new(self).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{LEAD_ALIAS_ENV, RewriterSettings, TABLE_PREFIX_ENV, WhereMatching};
    use crate::settings::error::SettingsError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = RewriterSettings::default();
        assert_eq!(settings.table_prefix, "");
        assert_eq!(settings.lead_prefix(), "l.");
        assert_eq!(settings.where_matching, WhereMatching::Boundary);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: RewriterSettings =
            serde_json::from_str(r#"{"table_prefix": "mautic_", "where_matching": "literal"}"#)
                .expect("valid settings");

        assert_eq!(settings.table_prefix, "mautic_");
        assert_eq!(settings.lead_alias, "l");
        assert_eq!(settings.where_matching, WhereMatching::Literal);
    }

    #[test]
    fn test_overrides() {
        let settings = RewriterSettings::default().with_overrides(|key| match key {
            TABLE_PREFIX_ENV => Some("crm_".to_string()),
            LEAD_ALIAS_ENV => Some("lead".to_string()),
            _ => None,
        });

        assert_eq!(settings.table_prefix, "crm_");
        assert_eq!(settings.lead_prefix(), "lead.");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{"lead_alias": "ld"}"#)
            .expect("write settings");

        let settings = RewriterSettings::from_path(file.path()).expect("settings from file");
        assert_eq!(settings.lead_alias, "ld");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = RewriterSettings::from_path("/nonexistent/xfield.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
