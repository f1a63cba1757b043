//! Configuration validation

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::types::PresetOptions;

/// Validate preset options.
///
/// Empty formats are rejected. A format missing its link-specific placeholder
/// is only reported: expansion leaves such links static.
pub fn validate_options(options: &PresetOptions) -> Result<()> {
    debug!("validating preset options");
    check_format("userUrlFormat", &options.user_url_format, "{{user}}")?;
    check_format("commitUrlFormat", &options.commit_url_format, "{{hash}}")?;
    check_format(
        "compareUrlFormat",
        &options.compare_url_format,
        "{{currentTag}}",
    )?;
    if let Some(issue) = &options.issue_url_format {
        check_format("issueUrlFormat", issue, "{{id}}")?;
    }
    debug!("preset options validation passed");
    Ok(())
}

fn check_format(field: &str, value: &str, placeholder: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: "format cannot be empty".to_string(),
        }
        .into());
    }

    if !value.contains(placeholder) {
        warn!(field, placeholder, "url format has no placeholder for the link target");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        assert!(validate_options(&PresetOptions::default()).is_ok());
    }

    #[test]
    fn test_empty_format_rejected() {
        let options = PresetOptions::default().with_commit_url_format("  ");
        assert!(validate_options(&options).is_err());
    }

    #[test]
    fn test_missing_placeholder_is_not_an_error() {
        let options = PresetOptions::default().with_issue_url_format("https://test.com/issues");
        assert!(validate_options(&options).is_ok());
    }
}
