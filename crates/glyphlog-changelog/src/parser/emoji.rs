//! Emoji-prefixed conventional commit parser
//!
//! Splits a raw commit message into header fields, body, footer, breaking
//! change notes, issue references and mentions.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::{CommitParser, ParserRules};
use crate::types::{CommitRecord, Note, RawCommit, Reference};

/// Regex for `#12` and `owner/repo#12` issue references
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?P<owner>[\w.-]+)/)?(?P<repository>[\w.-]+)?#(?P<issue>\d+)")
        .expect("Invalid regex")
});

/// Regex for `@handle` mentions
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@(?P<user>[\w-]+)").expect("Invalid regex"));

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("Invalid regex"));

/// Parser for `:emoji: type(scope): subject` commits
pub struct EmojiCommitParser {
    rules: ParserRules,
}

impl EmojiCommitParser {
    /// Create a new parser with the default rules
    pub fn new() -> Self {
        Self {
            rules: ParserRules::default(),
        }
    }

    /// Create a parser with custom rules
    pub fn with_rules(rules: ParserRules) -> Self {
        Self { rules }
    }

    /// The rules this parser applies
    pub fn rules(&self) -> &ParserRules {
        &self.rules
    }

    /// A footer starts at the first note line or reference-action line
    fn is_footer_line(&self, line: &str) -> bool {
        self.rules.match_note(line).is_some() || self.starts_with_action(line)
    }

    fn starts_with_action(&self, line: &str) -> bool {
        let line = line.trim_start();
        let Some(word) = WORD_REGEX.find(line).filter(|w| w.start() == 0) else {
            return false;
        };
        self.rules.is_reference_action(word.as_str())
            && REFERENCE_REGEX.is_match(&line[word.end()..])
    }

    /// Collect notes.
    ///
    /// A note runs until the next note or reference-action line. Blank lines
    /// inside it are kept; surrounding whitespace is trimmed at the end.
    fn parse_notes(&self, footer: &[&str]) -> Vec<Note> {
        let mut notes: Vec<Note> = Vec::new();
        let mut in_note = false;

        for line in footer {
            if let Some(note) = self.rules.match_note(line) {
                notes.push(note);
                in_note = true;
                continue;
            }

            if self.starts_with_action(line) {
                in_note = false;
                continue;
            }

            if in_note {
                if let Some(last) = notes.last_mut() {
                    last.text.push('\n');
                    last.text.push_str(line.trim());
                }
            }
        }

        for note in &mut notes {
            note.text = note.text.trim().to_string();
        }
        notes
    }

    /// Collect references from one line.
    ///
    /// An action word applies to every reference after it on the line until
    /// another action word appears.
    fn parse_references(&self, line: &str) -> Vec<Reference> {
        let mut references = Vec::new();
        let mut action: Option<String> = None;
        let mut cursor = 0;

        for caps in REFERENCE_REGEX.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            if let Some(found) = self.last_action_in(&line[cursor..whole.start()]) {
                action = Some(found);
            }

            references.push(Reference {
                action: action.clone(),
                owner: caps.name("owner").map(|m| m.as_str().to_string()),
                repository: caps.name("repository").map(|m| m.as_str().to_string()),
                prefix: "#".to_string(),
                issue: caps["issue"].to_string(),
                raw: whole.as_str().to_string(),
            });
            cursor = whole.end();
        }

        references
    }

    fn last_action_in(&self, text: &str) -> Option<String> {
        WORD_REGEX
            .find_iter(text)
            .filter(|w| self.rules.is_reference_action(w.as_str()))
            .last()
            .map(|w| w.as_str().to_string())
    }
}

impl Default for EmojiCommitParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitParser for EmojiCommitParser {
    fn parse(&self, commit: &RawCommit) -> CommitRecord {
        let message = commit.message.trim_start_matches(['\r', '\n']);
        let mut lines = message.lines();
        let header = lines.next().unwrap_or("").trim_end();
        let rest: Vec<&str> = lines.collect();

        let fields = self.rules.match_header(header).unwrap_or_default();

        let start = rest
            .iter()
            .position(|l| !l.trim().is_empty())
            .unwrap_or(rest.len());
        let rest = &rest[start..];
        let footer_start = rest
            .iter()
            .position(|l| self.is_footer_line(l))
            .unwrap_or(rest.len());
        let (body_lines, footer_lines) = rest.split_at(footer_start);

        let join = |lines: &[&str]| {
            let text = lines.join("\n").trim().to_string();
            (!text.is_empty()).then_some(text)
        };

        // references in the subject (or the raw header) and in the footer
        let header_text = fields.subject.as_deref().unwrap_or(header);
        let mut references = self.parse_references(header_text);
        for line in footer_lines {
            if self.rules.match_note(line).is_none() {
                references.extend(self.parse_references(line));
            }
        }

        let mentions = MENTION_REGEX
            .captures_iter(message)
            .map(|caps| caps["user"].to_string())
            .collect();

        let record = CommitRecord {
            hash: (!commit.hash.is_empty()).then(|| commit.hash.clone()),
            header: (!header.is_empty()).then(|| header.to_string()),
            emoji: fields.emoji,
            commit_type: fields.commit_type,
            scope: fields.scope,
            subject: fields.subject,
            body: join(body_lines),
            footer: join(footer_lines),
            notes: self.parse_notes(footer_lines),
            references,
            mentions,
            revert: self.rules.match_revert(message),
            owner: None,
            repository: None,
        };

        trace!(
            hash = %commit.hash,
            commit_type = ?record.commit_type,
            notes = record.notes.len(),
            references = record.references.len(),
            "parsed commit"
        );
        record
    }
}
