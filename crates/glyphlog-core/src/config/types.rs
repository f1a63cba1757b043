//! Preset option types

use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_COMMIT_URL_FORMAT, DEFAULT_COMPARE_URL_FORMAT, DEFAULT_USER_URL_FORMAT,
};

/// Options recognized by the preset.
///
/// Keys use the camelCase spelling (`userUrlFormat`, `issueUrlFormat`, ...).
/// Unrecognized keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresetOptions {
    /// Template for `@user` mention links
    pub user_url_format: String,

    /// Template for `#N` issue links; `None` defers to the project descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url_format: Option<String>,

    /// Template for per-commit links
    pub commit_url_format: String,

    /// Template for tag-to-tag comparison links
    pub compare_url_format: String,
}

impl Default for PresetOptions {
    fn default() -> Self {
        Self {
            user_url_format: DEFAULT_USER_URL_FORMAT.to_string(),
            issue_url_format: None,
            commit_url_format: DEFAULT_COMMIT_URL_FORMAT.to_string(),
            compare_url_format: DEFAULT_COMPARE_URL_FORMAT.to_string(),
        }
    }
}

impl PresetOptions {
    /// Create options with the default link formats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user mention link format
    pub fn with_user_url_format(mut self, format: impl Into<String>) -> Self {
        self.user_url_format = format.into();
        self
    }

    /// Set the issue link format
    pub fn with_issue_url_format(mut self, format: impl Into<String>) -> Self {
        self.issue_url_format = Some(format.into());
        self
    }

    /// Set the commit link format
    pub fn with_commit_url_format(mut self, format: impl Into<String>) -> Self {
        self.commit_url_format = format.into();
        self
    }

    /// Set the compare link format
    pub fn with_compare_url_format(mut self, format: impl Into<String>) -> Self {
        self.compare_url_format = format.into();
        self
    }
}
