//! Changelog generation

use tracing::{debug, info, instrument};

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::grouping::GroupingConfig;
use crate::parser::CommitParser;
use crate::preset::Preset;
use crate::transform::{CommitTransform, RenderContext};
use crate::types::{ChangelogEntry, CommitRecord, RawCommit};

/// Changelog generator
///
/// Runs the parser, the commit transform and grouping over raw commits.
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ChangelogFormatter>,
    transform: CommitTransform,
    grouping: GroupingConfig,
    context: RenderContext,
}

impl ChangelogGenerator {
    /// Create a generator from a preset
    pub fn new(preset: &Preset) -> Self {
        Self {
            parser: Box::new(preset.parser()),
            formatter: Box::new(MarkdownFormatter::from_preset(preset)),
            transform: preset.writer.transform.clone(),
            grouping: preset.writer.grouping.clone(),
            context: preset.context.clone(),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Override the repository coordinates used for links
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    /// Parse and transform commits, dropping omitted ones
    pub fn transform_commits(&self, commits: &[RawCommit]) -> Vec<CommitRecord> {
        commits
            .iter()
            .map(|c| self.parser.parse(c))
            .filter_map(|c| self.transform.transform(c, &self.context).into_commit())
            .collect()
    }

    /// Generate a changelog entry from commits
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, version: &str, commits: &[RawCommit]) -> ChangelogEntry {
        info!(version, commit_count = commits.len(), "generating changelog entry");
        let mut entry = ChangelogEntry::new(version);

        let transformed = self.transform_commits(commits);
        let omitted = commits.len() - transformed.len();

        entry.note_groups = self.grouping.group_notes(&transformed);
        entry.commit_groups = self.grouping.group_commits(transformed);

        debug!(
            group_count = entry.commit_groups.len(),
            note_group_count = entry.note_groups.len(),
            omitted,
            "changelog groups built"
        );

        entry
    }

    /// Format a changelog entry to string
    pub fn format(&self, entry: &ChangelogEntry) -> String {
        self.formatter.format(entry)
    }

    /// Generate and format in one step
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate_formatted(&self, version: &str, commits: &[RawCommit]) -> String {
        let entry = self.generate(version, commits);
        let output = self.format(&entry);
        debug!(output_len = output.len(), "changelog formatted");
        output
    }
}
