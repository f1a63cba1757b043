//! Commit parsing

mod emoji;
mod rules;

pub use emoji::EmojiCommitParser;
pub use rules::*;

use crate::types::{CommitRecord, RawCommit};

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a raw commit into a structured record.
    ///
    /// A header that does not match yields a record without type, scope and
    /// subject rather than an error.
    fn parse(&self, commit: &RawCommit) -> CommitRecord;
}
