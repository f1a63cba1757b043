//! Per-commit transform
//!
//! Turns a parsed [`CommitRecord`] into its rendering-ready form, or omits it.
//! The transform is one-shot: feeding an already transformed record back in
//! does not fail, but its display label no longer matches the type table.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::template::{expand_template, PlaceholderMap};
use crate::types::{CommitRecord, CommitType, BREAKING_CHANGES_TITLE};

/// Length of a displayed short hash
pub const SHORT_HASH_LEN: usize = 7;

static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(?P<issue>[0-9]+)").expect("Invalid regex"));

static USER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\B@(?P<user>[a-z0-9](?:-?[a-z0-9/]){0,38})").expect("Invalid regex")
});

/// Repository coordinates available to link templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    /// Scheme and host, e.g. `https://github.com`
    pub host: Option<String>,
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repository: Option<String>,
}

impl RenderContext {
    /// Create a context from all three coordinates
    pub fn new(
        host: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            host: Some(host.into()),
            owner: Some(owner.into()),
            repository: Some(repository.into()),
        }
    }

    /// Placeholders for a commit; the commit's own owner/repository win
    pub fn placeholders_for(&self, commit: &CommitRecord) -> PlaceholderMap {
        PlaceholderMap::new()
            .with_opt("host", self.host.as_deref())
            .with_opt("owner", commit.owner.as_deref().or(self.owner.as_deref()))
            .with_opt(
                "repository",
                commit.repository.as_deref().or(self.repository.as_deref()),
            )
    }
}

/// Result of transforming one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// Forward the commit to grouping and rendering
    Emit(CommitRecord),
    /// Drop the commit from all output
    Omit,
}

impl TransformOutcome {
    /// The emitted commit, if any
    pub fn into_commit(self) -> Option<CommitRecord> {
        match self {
            Self::Emit(commit) => Some(commit),
            Self::Omit => None,
        }
    }

    /// Check if the commit was omitted
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omit)
    }
}

/// The commit transform applied before grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTransform {
    user_url_format: String,
    issue_url_format: Option<String>,
}

impl CommitTransform {
    /// Create a transform.
    ///
    /// Without an issue URL format, inline `#N` references are left as text.
    pub fn new(user_url_format: impl Into<String>, issue_url_format: Option<String>) -> Self {
        Self {
            user_url_format: user_url_format.into(),
            issue_url_format,
        }
    }

    /// The issue URL format in effect
    pub fn issue_url_format(&self) -> Option<&str> {
        self.issue_url_format.as_deref()
    }

    /// Transform one commit
    pub fn transform(&self, mut commit: CommitRecord, context: &RenderContext) -> TransformOutcome {
        let mut discard = true;

        for note in &mut commit.notes {
            note.title = BREAKING_CHANGES_TITLE.to_string();
            discard = false;
        }

        match commit.commit_type.as_deref().and_then(CommitType::from_token) {
            Some(commit_type) => commit.commit_type = Some(commit_type.label().to_string()),
            None if discard => {
                debug!(
                    hash = ?commit.hash,
                    commit_type = ?commit.commit_type,
                    "omitting commit with unrecognized type"
                );
                return TransformOutcome::Omit;
            }
            None => {}
        }

        if commit.scope.as_deref() == Some("*") {
            commit.scope = None;
        }

        if let Some(hash) = commit.hash.as_mut() {
            if let Some((cut, _)) = hash.char_indices().nth(SHORT_HASH_LEN) {
                hash.truncate(cut);
            }
        }

        let placeholders = context.placeholders_for(&commit);
        let mut linked_issues: Vec<String> = Vec::new();

        if let Some(subject) = commit.subject.take() {
            let subject = match &self.issue_url_format {
                Some(format) => link_issues(&subject, format, &placeholders, &mut linked_issues),
                None => subject,
            };
            commit.subject = Some(link_users(&subject, &self.user_url_format, &placeholders));
        }

        if !linked_issues.is_empty() {
            commit
                .references
                .retain(|reference| !linked_issues.contains(&reference.issue));
        }

        TransformOutcome::Emit(commit)
    }
}

/// Replace `#N` with `[#N](url)`, recording every linked issue
fn link_issues(
    subject: &str,
    format: &str,
    placeholders: &PlaceholderMap,
    linked: &mut Vec<String>,
) -> String {
    ISSUE_REGEX
        .replace_all(subject, |caps: &Captures| {
            let issue = &caps["issue"];
            linked.push(issue.to_string());
            let url = expand_template(format, &placeholders.clone().with("id", issue));
            format!("[#{}]({})", issue, url)
        })
        .into_owned()
}

/// Replace `@user` with `[@user](url)`; slash-containing handles are paths
fn link_users(subject: &str, format: &str, placeholders: &PlaceholderMap) -> String {
    USER_REGEX
        .replace_all(subject, |caps: &Captures| {
            let user = &caps["user"];
            if user.contains('/') {
                return format!("@{}", user);
            }
            let url = expand_template(format, &placeholders.clone().with("user", user));
            format!("[@{}]({})", user, url)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Note, Reference};

    fn transform() -> CommitTransform {
        CommitTransform::new(
            "https://test.com/{{user}}",
            Some("https://test.com/issues/{{id}}".to_string()),
        )
    }

    fn commit(commit_type: &str, subject: &str) -> CommitRecord {
        CommitRecord {
            hash: Some("0123456789abcdef0123456789abcdef01234567".to_string()),
            commit_type: Some(commit_type.to_string()),
            subject: Some(subject.to_string()),
            ..Default::default()
        }
    }

    fn note(text: &str) -> Note {
        Note {
            title: "BREAKING CHANGE".to_string(),
            text: text.to_string(),
        }
    }

    fn reference(issue: &str) -> Reference {
        Reference {
            action: Some("closes".to_string()),
            owner: None,
            repository: None,
            prefix: "#".to_string(),
            issue: issue.to_string(),
            raw: format!("#{}", issue),
        }
    }

    fn emit(outcome: TransformOutcome) -> CommitRecord {
        outcome.into_commit().expect("commit should be emitted")
    }

    #[test]
    fn test_recognized_types_get_labels() {
        let ctx = RenderContext::default();
        for commit_type in CommitType::all() {
            let out = emit(transform().transform(commit(commit_type.token(), "x"), &ctx));
            assert_eq!(out.commit_type, Some(commit_type.label().to_string()));
        }
    }

    #[test]
    fn test_unrecognized_type_without_notes_is_omitted() {
        let ctx = RenderContext::default();
        assert!(transform().transform(commit("wip", "x"), &ctx).is_omitted());
        assert!(transform().transform(CommitRecord::default(), &ctx).is_omitted());
    }

    #[test]
    fn test_notes_keep_unrecognized_commit() {
        let mut record = commit("wip", "x");
        record.notes.push(note("The Change is huge."));

        let out = emit(transform().transform(record, &RenderContext::default()));
        assert_eq!(out.commit_type.as_deref(), Some("wip"));
        assert_eq!(out.notes[0].title, BREAKING_CHANGES_TITLE);
        assert_eq!(out.notes[0].text, "The Change is huge.");
    }

    #[test]
    fn test_untyped_commit_with_note_is_kept() {
        let record = CommitRecord {
            notes: vec![note("huge")],
            ..Default::default()
        };
        let out = emit(transform().transform(record, &RenderContext::default()));
        assert!(out.commit_type.is_none());
    }

    #[test]
    fn test_wildcard_scope_cleared() {
        let mut record = commit("fix", "oops");
        record.scope = Some("*".to_string());

        let out = emit(transform().transform(record, &RenderContext::default()));
        assert!(out.scope.is_none());
    }

    #[test]
    fn test_other_scope_kept() {
        let mut record = commit("fix", "oops");
        record.scope = Some("compile".to_string());

        let out = emit(transform().transform(record, &RenderContext::default()));
        assert_eq!(out.scope.as_deref(), Some("compile"));
    }

    #[test]
    fn test_hash_shortened() {
        let out = emit(transform().transform(commit("feat", "x"), &RenderContext::default()));
        assert_eq!(out.hash.as_deref(), Some("0123456"));
    }

    #[test]
    fn test_short_or_missing_hash_unchanged() {
        let mut record = commit("feat", "x");
        record.hash = Some("abc".to_string());
        let out = emit(transform().transform(record, &RenderContext::default()));
        assert_eq!(out.hash.as_deref(), Some("abc"));

        let mut record = commit("feat", "x");
        record.hash = None;
        let out = emit(transform().transform(record, &RenderContext::default()));
        assert!(out.hash.is_none());
    }

    #[test]
    fn test_issue_links_and_reference_dedup() {
        let mut record = commit("feat", "fix #88 and #42");
        record.references = vec![reference("88"), reference("7")];

        let out = emit(transform().transform(record, &RenderContext::default()));
        assert_eq!(
            out.subject.as_deref(),
            Some("fix [#88](https://test.com/issues/88) and [#42](https://test.com/issues/42)")
        );
        let remaining: Vec<&str> = out.references.iter().map(|r| r.issue.as_str()).collect();
        assert_eq!(remaining, vec!["7"]);
    }

    #[test]
    fn test_issue_link_uses_context_placeholders() {
        let transform = CommitTransform::new(
            "{{host}}/{{user}}",
            Some("{{host}}/{{owner}}/{{repository}}/issues/{{id}}".to_string()),
        );
        let ctx = RenderContext::new("https://github.com", "acme", "widgets");

        let out = emit(transform.transform(commit("fix", "see #3"), &ctx));
        assert_eq!(
            out.subject.as_deref(),
            Some("see [#3](https://github.com/acme/widgets/issues/3)")
        );

        let mut record = commit("fix", "see #3");
        record.owner = Some("other".to_string());
        let out = emit(transform.transform(record, &ctx));
        assert_eq!(
            out.subject.as_deref(),
            Some("see [#3](https://github.com/other/widgets/issues/3)")
        );
    }

    #[test]
    fn test_no_issue_format_leaves_issues_and_references() {
        let transform = CommitTransform::new("https://test.com/{{user}}", None);
        let mut record = commit("feat", "fix #88");
        record.references = vec![reference("88")];

        let out = emit(transform.transform(record, &RenderContext::default()));
        assert_eq!(out.subject.as_deref(), Some("fix #88"));
        assert_eq!(out.references.len(), 1);
    }

    #[test]
    fn test_user_mentions_linked() {
        let out = emit(transform().transform(
            commit("feat", "issue brought up by @ellerbrock! on Friday"),
            &RenderContext::default(),
        ));
        assert_eq!(
            out.subject.as_deref(),
            Some("issue brought up by [@ellerbrock](https://test.com/ellerbrock)! on Friday")
        );
    }

    #[test]
    fn test_mentions_are_lowercase_only() {
        let out = emit(transform().transform(
            commit("feat", "thanks @Ellerbrock and @ellerbrock"),
            &RenderContext::default(),
        ));
        assert_eq!(
            out.subject.as_deref(),
            Some("thanks @Ellerbrock and [@ellerbrock](https://test.com/ellerbrock)")
        );
    }

    #[test]
    fn test_slash_mentions_left_alone() {
        let out = emit(transform().transform(
            commit("chore", "bump @types/node and @angular/core"),
            &RenderContext::default(),
        ));
        assert_eq!(out.subject.as_deref(), Some("bump @types/node and @angular/core"));
    }

    #[test]
    fn test_email_is_not_a_mention() {
        let out = emit(transform().transform(
            commit("docs", "contact dev@example.com"),
            &RenderContext::default(),
        ));
        assert_eq!(out.subject.as_deref(), Some("contact dev@example.com"));
    }

    #[test]
    fn test_second_application_does_not_panic() {
        let ctx = RenderContext::default();
        let once = emit(transform().transform(commit("feat", "x #1"), &ctx));
        // the display label is not a raw token, so without notes it is omitted
        assert!(transform().transform(once.clone(), &ctx).is_omitted());

        let mut with_note = once;
        with_note.notes.push(note("n"));
        let twice = emit(transform().transform(with_note, &ctx));
        assert_eq!(twice.hash.as_deref(), Some("0123456"));
    }
}
