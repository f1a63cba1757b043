//! Changelog types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display title given to every breaking-change note
pub const BREAKING_CHANGES_TITLE: &str = ":bangbang: BREAKING CHANGES";

/// A commit as read from history, before parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full commit hash
    pub hash: String,
    /// Full commit message (header, body and footer)
    pub message: String,
}

impl RawCommit {
    /// Create a new raw commit
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }
}

/// Structured representation of one commit message.
///
/// Produced by a [`CommitParser`](crate::parser::CommitParser) and consumed by
/// the [`CommitTransform`](crate::transform::CommitTransform).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit hash
    pub hash: Option<String>,
    /// First line of the message
    pub header: Option<String>,
    /// Leading emoji marker, e.g. `:sparkles:`
    pub emoji: Option<String>,
    /// Type token (`feat`, `fix`, ...); a display label after transform
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope (in parentheses)
    pub scope: Option<String>,
    /// Subject text after the `: ` separator
    pub subject: Option<String>,
    /// Body text between header and footer
    pub body: Option<String>,
    /// Footer text (notes and reference actions)
    pub footer: Option<String>,
    /// Breaking-change notes
    pub notes: Vec<Note>,
    /// Issue references
    pub references: Vec<Reference>,
    /// `@handle` mentions, in order of appearance
    pub mentions: Vec<String>,
    /// Set for revert commits
    pub revert: Option<Revert>,
    /// Repository owner when the commit belongs to another repository
    pub owner: Option<String>,
    /// Repository name when the commit belongs to another repository
    pub repository: Option<String>,
}

impl CommitRecord {
    /// Check if this commit carries at least one breaking-change note
    pub fn is_breaking(&self) -> bool {
        !self.notes.is_empty()
    }

    /// Scope as a string, absent scope being empty
    pub fn scope_str(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }

    /// Subject as a string, absent subject being empty
    pub fn subject_str(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }
}

/// A breaking-change note lifted from the footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note title (the keyword, replaced by the display title on transform)
    pub title: String,
    /// Note text
    pub text: String,
}

/// An issue reference such as `closes #12` or `acme/widgets#3`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Action keyword preceding the reference, if any
    pub action: Option<String>,
    /// Owner of a cross-repository reference
    pub owner: Option<String>,
    /// Repository of a cross-repository reference
    pub repository: Option<String>,
    /// Issue prefix, `#`
    pub prefix: String,
    /// Issue number
    pub issue: String,
    /// Reference as written
    pub raw: String,
}

/// Revert metadata captured from the canonical revert footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Header of the reverted commit
    pub header: String,
    /// Hash of the reverted commit
    pub hash: String,
}

/// Recognized commit types.
///
/// Anything else is untyped and only survives transform when it carries a
/// breaking-change note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

/// Display label for a commit type: a glyph and a section title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeLabel {
    pub glyph: &'static str,
    pub title: &'static str,
}

impl std::fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.glyph, self.title)
    }
}

/// Raw token, type and label for every recognized type
static TYPE_TABLE: [(&str, CommitType, TypeLabel); 11] = [
    ("feat", CommitType::Feat, TypeLabel { glyph: ":sparkles:", title: "Features" }),
    ("fix", CommitType::Fix, TypeLabel { glyph: ":bug:", title: "Bug Fixes" }),
    ("docs", CommitType::Docs, TypeLabel { glyph: ":book:", title: "Documentation" }),
    ("style", CommitType::Style, TypeLabel { glyph: ":gem:", title: "Styles" }),
    ("refactor", CommitType::Refactor, TypeLabel { glyph: ":package:", title: "Code Refactoring" }),
    ("perf", CommitType::Perf, TypeLabel { glyph: ":rocket:", title: "Performance Improvements" }),
    ("test", CommitType::Test, TypeLabel { glyph: ":rotating_light:", title: "Tests" }),
    ("build", CommitType::Build, TypeLabel { glyph: ":construction_worker:", title: "Build" }),
    ("ci", CommitType::Ci, TypeLabel { glyph: ":computer:", title: "Continuous Integration" }),
    ("chore", CommitType::Chore, TypeLabel { glyph: ":ticket:", title: "Chores" }),
    ("revert", CommitType::Revert, TypeLabel { glyph: ":back:", title: "Reverts" }),
];

impl CommitType {
    /// Look up a raw type token; matching is exact
    pub fn from_token(token: &str) -> Option<Self> {
        TYPE_TABLE
            .iter()
            .find(|(raw, _, _)| *raw == token)
            .map(|(_, commit_type, _)| *commit_type)
    }

    /// The raw token for this type
    pub fn token(&self) -> &'static str {
        self.entry().0
    }

    /// The display label for this type
    pub fn label(&self) -> TypeLabel {
        self.entry().2
    }

    /// All recognized types, in table order
    pub fn all() -> impl Iterator<Item = CommitType> {
        TYPE_TABLE.iter().map(|(_, commit_type, _)| *commit_type)
    }

    fn entry(&self) -> &'static (&'static str, CommitType, TypeLabel) {
        &TYPE_TABLE[self.row()]
    }

    /// Row of this type in `TYPE_TABLE`
    fn row(&self) -> usize {
        match self {
            Self::Feat => 0,
            Self::Fix => 1,
            Self::Docs => 2,
            Self::Style => 3,
            Self::Refactor => 4,
            Self::Perf => 5,
            Self::Test => 6,
            Self::Build => 7,
            Self::Ci => 8,
            Self::Chore => 9,
            Self::Revert => 10,
        }
    }
}

/// A group of commits sharing a display type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitGroup {
    /// Group title (the type label); empty for untyped commits
    pub title: String,
    /// Commits in this group
    pub commits: Vec<CommitRecord>,
}

impl CommitGroup {
    /// Create a new group
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            commits: Vec::new(),
        }
    }

    /// Check if the group is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A note together with the commit fields it is rendered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedNote {
    pub title: String,
    pub text: String,
    pub commit_scope: Option<String>,
    pub commit_hash: Option<String>,
}

/// A group of notes sharing a title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteGroup {
    /// Group title
    pub title: String,
    /// Notes in this group
    pub notes: Vec<GroupedNote>,
}

/// A changelog entry for a version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Version string
    pub version: String,
    /// Release date
    pub date: DateTime<Utc>,
    /// Tag of the previous release, for compare links
    pub previous_tag: Option<String>,
    /// Tag of this release, for compare links
    pub current_tag: Option<String>,
    /// Commit groups, sorted
    pub commit_groups: Vec<CommitGroup>,
    /// Note groups, sorted
    pub note_groups: Vec<NoteGroup>,
}

impl ChangelogEntry {
    /// Create a new changelog entry
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: Utc::now(),
            previous_tag: None,
            current_tag: None,
            commit_groups: Vec::new(),
            note_groups: Vec::new(),
        }
    }

    /// Set the date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Set the tags used for the compare link
    pub fn with_tags(mut self, previous: impl Into<String>, current: impl Into<String>) -> Self {
        self.previous_tag = Some(previous.into());
        self.current_tag = Some(current.into());
        self
    }

    /// Check if entry has any content
    pub fn is_empty(&self) -> bool {
        self.commit_groups.iter().all(CommitGroup::is_empty) && self.note_groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table_lookup() {
        assert_eq!(CommitType::from_token("feat"), Some(CommitType::Feat));
        assert_eq!(CommitType::from_token("revert"), Some(CommitType::Revert));
        assert_eq!(CommitType::from_token("Feat"), None);
        assert_eq!(CommitType::from_token("feature"), None);
        assert_eq!(CommitType::from_token(""), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CommitType::Feat.label().to_string(), ":sparkles: Features");
        assert_eq!(CommitType::Fix.label().to_string(), ":bug: Bug Fixes");
        assert_eq!(CommitType::Ci.label().title, "Continuous Integration");
    }

    #[test]
    fn test_every_type_round_trips_through_its_token() {
        assert_eq!(CommitType::all().count(), 11);
        for commit_type in CommitType::all() {
            assert_eq!(CommitType::from_token(commit_type.token()), Some(commit_type));
        }
    }

    #[test]
    fn test_every_variant_points_at_its_own_row() {
        let variants = [
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Docs,
            CommitType::Style,
            CommitType::Refactor,
            CommitType::Perf,
            CommitType::Test,
            CommitType::Build,
            CommitType::Ci,
            CommitType::Chore,
            CommitType::Revert,
        ];
        assert_eq!(variants.len(), TYPE_TABLE.len());

        for (row, commit_type) in variants.iter().enumerate() {
            assert_eq!(commit_type.row(), row);
            assert_eq!(TYPE_TABLE[row].1, *commit_type);
        }
    }

    #[test]
    fn test_entry_is_empty() {
        let mut entry = ChangelogEntry::new("1.0.0");
        assert!(entry.is_empty());

        let mut group = CommitGroup::new(":bug: Bug Fixes");
        group.commits.push(CommitRecord::default());
        entry.commit_groups.push(group);
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = CommitRecord {
            commit_type: Some("feat".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "feat");
    }
}
