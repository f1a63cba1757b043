//! Declarative parser rules
//!
//! Header, revert and breaking-change note patterns handed to the commit
//! parser. Headers look like:
//!
//! ```text
//! :sparkles: feat(parser): support nested scopes
//! ✨ fix: handle `a: b` subjects
//! chore: bump deps
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{Note, Revert};

/// Optional emoji marker, bare-word type, optional scope, `: `, subject.
///
/// The marker is a `:shortcode:`, a flag, or a pictographic emoji with its
/// variation selectors, skin-tone modifiers and zero-width-joined parts.
pub const HEADER_PATTERN: &str = r"^(?:(?P<emoji>:\w+:|\p{Regional_Indicator}{2}|\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier}|\x{200D}\p{Extended_Pictographic})*)\s*)?(?P<type>\w*)(?:\((?P<scope>[^()\r\n]*)\))?: (?P<subject>.*)$";

/// `revert:` header followed by the canonical revert footer
pub const REVERT_PATTERN: &str =
    r"(?s)^(?::\w+:\s*)?revert:\s(?P<header>.*?)\s*This reverts commit (?P<hash>\w*)\.";

/// Header capture groups, in order
pub const HEADER_CORRESPONDENCE: [&str; 4] = ["emoji", "type", "scope", "subject"];

/// Revert capture groups, in order
pub const REVERT_CORRESPONDENCE: [&str; 2] = ["header", "hash"];

/// Footer keywords that open a breaking-change note
pub const NOTE_KEYWORDS: [&str; 2] = ["BREAKING CHANGE", "BREAKING CHANGES"];

/// Words that turn a following issue reference into an action
pub const REFERENCE_ACTIONS: [&str; 9] = [
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("Invalid regex"));

static REVERT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REVERT_PATTERN).expect("Invalid regex"));

/// Fields captured from a matching header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMatch {
    pub emoji: Option<String>,
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
}

/// Parser rule set handed to the changelog host
#[derive(Debug, Clone, Serialize)]
pub struct ParserRules {
    /// Header pattern source
    pub header_pattern: &'static str,
    /// Header capture groups
    pub header_correspondence: Vec<&'static str>,
    /// Revert pattern source
    pub revert_pattern: &'static str,
    /// Revert capture groups
    pub revert_correspondence: Vec<&'static str>,
    /// Note keywords; every keyword is an equivalent trigger
    pub note_keywords: Vec<String>,
    /// Reference action words, matched case-insensitively
    pub reference_actions: Vec<String>,
}

impl Default for ParserRules {
    fn default() -> Self {
        Self {
            header_pattern: HEADER_PATTERN,
            header_correspondence: HEADER_CORRESPONDENCE.to_vec(),
            revert_pattern: REVERT_PATTERN,
            revert_correspondence: REVERT_CORRESPONDENCE.to_vec(),
            note_keywords: NOTE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            reference_actions: REFERENCE_ACTIONS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl ParserRules {
    /// Add a note keyword
    pub fn note_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.note_keywords.push(keyword.into());
        self
    }

    /// Match a header line
    pub fn match_header(&self, header: &str) -> Option<HeaderMatch> {
        let caps = HEADER_REGEX.captures(header)?;
        let field = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty())
        };

        Some(HeaderMatch {
            emoji: field("emoji"),
            commit_type: field("type"),
            scope: field("scope"),
            subject: field("subject"),
        })
    }

    /// Match the revert rule against a full commit message
    pub fn match_revert(&self, message: &str) -> Option<Revert> {
        let caps = REVERT_REGEX.captures(message)?;
        Some(Revert {
            header: caps.name("header")?.as_str().to_string(),
            hash: caps.name("hash")?.as_str().to_string(),
        })
    }

    /// Match a footer line that opens a breaking-change note.
    ///
    /// The keyword must be followed by `:` or whitespace; the longest keyword
    /// wins so `BREAKING CHANGES:` is not read as `BREAKING CHANGE` + `S:`.
    pub fn match_note(&self, line: &str) -> Option<Note> {
        let line = line.trim_start_matches(|c: char| c.is_whitespace() || c == '*');

        let mut keywords: Vec<&String> = self.note_keywords.iter().collect();
        keywords.sort_by_key(|k| std::cmp::Reverse(k.len()));

        keywords.into_iter().find_map(|keyword| {
            let rest = line.strip_prefix(keyword.as_str())?;
            if !rest.starts_with(|c: char| c == ':' || c.is_whitespace()) {
                return None;
            }
            Some(Note {
                title: keyword.clone(),
                text: rest
                    .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
                    .trim_end()
                    .to_string(),
            })
        })
    }

    /// Check if a word is a reference action
    pub fn is_reference_action(&self, word: &str) -> bool {
        self.reference_actions
            .iter()
            .any(|action| action.eq_ignore_ascii_case(word))
    }
}
