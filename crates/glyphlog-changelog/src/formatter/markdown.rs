//! Markdown changelog formatter
//!
//! Lays a release out the way the bundled templates do.

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::preset::{LinkFormats, Preset};
use crate::template::PlaceholderMap;
use crate::transform::RenderContext;
use crate::types::{ChangelogEntry, CommitRecord, Reference};

/// Markdown changelog formatter
pub struct MarkdownFormatter {
    links: LinkFormats,
    context: RenderContext,
    /// Link hashes and references
    pub link_references: bool,
    /// Link the version header to a tag comparison
    pub link_compare: bool,
}

impl MarkdownFormatter {
    /// Create a formatter for the given link formats and coordinates
    pub fn new(links: LinkFormats, context: RenderContext) -> Self {
        Self {
            links,
            context,
            link_references: true,
            link_compare: true,
        }
    }

    /// Create a formatter using a preset's link formats
    pub fn from_preset(preset: &Preset) -> Self {
        Self::new(preset.links.clone(), preset.context.clone())
    }

    /// Replace the repository coordinates
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    fn header(&self, entry: &ChangelogEntry) -> String {
        let date = entry.date.format("%Y-%m-%d");
        match (&entry.previous_tag, &entry.current_tag) {
            (Some(previous), Some(current)) if self.link_compare => {
                let placeholders = self.context.placeholders_for(&CommitRecord::default());
                let url = self.links.compare_url(previous, current, &placeholders);
                format!("## [{}]({}) ({})\n\n", entry.version, url, date)
            }
            _ => format!("## {} ({})\n\n", entry.version, date),
        }
    }

    fn commit_line(&self, commit: &CommitRecord) -> String {
        let placeholders = self.context.placeholders_for(commit);
        let mut line = String::from("*");

        if let Some(scope) = commit.scope.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(&format!(" **{}:**", scope));
        }
        let text = commit
            .subject
            .as_deref()
            .or(commit.header.as_deref())
            .unwrap_or("");
        line.push(' ');
        line.push_str(text);

        if let Some(hash) = &commit.hash {
            if self.link_references {
                let url = self.links.commit_url(hash, &placeholders);
                line.push_str(&format!(" ([{}]({}))", hash, url));
            } else {
                line.push_str(&format!(" {}", hash));
            }
        }

        if !commit.references.is_empty() {
            line.push_str(", closes");
            for reference in &commit.references {
                line.push(' ');
                line.push_str(&self.reference(reference, &placeholders));
            }
        }

        line.push('\n');
        line
    }

    fn reference(&self, reference: &Reference, placeholders: &PlaceholderMap) -> String {
        let mut text = String::new();
        if let Some(owner) = &reference.owner {
            text.push_str(owner);
            text.push('/');
        }
        if let Some(repository) = &reference.repository {
            text.push_str(repository);
        }
        text.push_str(&reference.prefix);
        text.push_str(&reference.issue);

        if !self.link_references {
            return text;
        }

        let mut placeholders = placeholders.clone();
        if let Some(owner) = &reference.owner {
            placeholders.set("owner", owner.as_str());
        }
        if let Some(repository) = &reference.repository {
            placeholders.set("repository", repository.as_str());
        }
        match self.links.issue_url(&reference.issue, &placeholders) {
            Some(url) => format!("[{}]({})", text, url),
            None => text,
        }
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, entry), fields(version = %entry.version, group_count = entry.commit_groups.len()))]
    fn format(&self, entry: &ChangelogEntry) -> String {
        let mut output = self.header(entry);

        for group in &entry.commit_groups {
            if group.is_empty() {
                continue;
            }
            if !group.title.is_empty() {
                output.push_str(&format!("### {}\n\n", group.title));
            }
            for commit in &group.commits {
                output.push_str(&self.commit_line(commit));
            }
            output.push('\n');
        }

        for group in &entry.note_groups {
            output.push_str(&format!("### {}\n\n", group.title));
            for note in &group.notes {
                match note.commit_scope.as_deref().filter(|s| !s.is_empty()) {
                    Some(scope) => output.push_str(&format!("* **{}:** {}\n", scope, note.text)),
                    None => output.push_str(&format!("* {}\n", note.text)),
                }
            }
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
