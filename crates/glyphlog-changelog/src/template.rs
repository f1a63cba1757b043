//! `{{placeholder}}` expansion for link formats
//!
//! Known names are replaced everywhere in one pass. Unknown names are left
//! as written, and substituted values are never expanded again.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(?P<name>[A-Za-z_][A-Za-z0-9_]*)\}\}").expect("Invalid regex"));

/// Placeholder names and their values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    values: BTreeMap<String, String>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value and return self for chaining
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Add a value if present; absent values leave the placeholder literal
    pub fn with_opt(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Add a value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Expand every known `{{name}}` in `template`.
///
/// ```
/// use glyphlog_changelog::template::{expand_template, PlaceholderMap};
///
/// let vars = PlaceholderMap::new().with("id", "42");
/// assert_eq!(
///     expand_template("https://test.com/issues/{{id}}?{{q}}", &vars),
///     "https://test.com/issues/42?{{q}}"
/// );
/// ```
pub fn expand_template(template: &str, placeholders: &PlaceholderMap) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            match placeholders.get(&caps["name"]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
