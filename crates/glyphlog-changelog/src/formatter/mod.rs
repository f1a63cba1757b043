//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::ChangelogEntry;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog entry to string
    fn format(&self, entry: &ChangelogEntry) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
