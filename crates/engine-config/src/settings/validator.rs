use crate::settings::{RewriterSettings, error::SettingsError};
use tracing::{info, warn};

/// Validates rewriter settings before a rewriter is constructed.
pub struct SettingsValidator<'a> {
    settings: &'a RewriterSettings,
}

impl<'a> SettingsValidator<'a> {
    pub fn new(settings: &'a RewriterSettings) -> Self {
        Self { settings }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors: Vec<String> = Vec::new();

        self.validate_lead_alias(&mut errors);
        self.validate_table_prefix(&mut errors);

        if !errors.is_empty() {
            return Err(SettingsError::ValidationFailed(errors));
        }

        info!("Settings validation completed successfully");
        Ok(())
    }

    fn validate_lead_alias(&self, errors: &mut Vec<String>) {
        let alias = &self.settings.lead_alias;
        if alias.is_empty() {
            errors.push("lead_alias must not be empty".to_string());
            return;
        }
        if alias.contains('.') || alias.chars().any(char::is_whitespace) {
            errors.push(format!(
                "lead_alias '{alias}' must not contain dots or whitespace"
            ));
        }
    }

    fn validate_table_prefix(&self, errors: &mut Vec<String>) {
        let prefix = &self.settings.table_prefix;
        if prefix
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
        {
            errors.push(format!(
                "table_prefix '{prefix}' may only contain ASCII letters, digits and underscores"
            ));
            return;
        }
        if !prefix.is_empty() && !prefix.ends_with('_') {
            warn!(
                "table_prefix '{}' has no trailing underscore; tables will be named like '{}lead_fields_leads_string_xref'",
                prefix, prefix
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::{RewriterSettings, error::SettingsError};
    use tracing_test::traced_test;

    fn settings(prefix: &str, alias: &str) -> RewriterSettings {
        RewriterSettings {
            table_prefix: prefix.to_string(),
            lead_alias: alias.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(settings("mautic_", "l").validate().is_ok());
        assert!(settings("", "l").validate().is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let err = settings("bad-prefix", "").validate().unwrap_err();
        match err {
            SettingsError::ValidationFailed(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dotted_alias_rejected() {
        assert!(settings("", "l.x").validate().is_err());
        assert!(settings("", "l x").validate().is_err());
    }

    #[traced_test]
    #[test]
    fn test_prefix_without_underscore_warns() {
        assert!(settings("mautic", "l").validate().is_ok());
        assert!(logs_contain("has no trailing underscore"));
    }
}
