//! Glyphlog Changelog - Emoji-flavoured conventional changelog preset
//!
//! This crate provides the commit parsing rules, the per-commit transform,
//! grouping and sorting keys and the preset bundle handed to a changelog
//! host. A small reference pipeline ([`ChangelogGenerator`]) and a markdown
//! formatter are included.

pub mod bump;
pub mod formatter;
pub mod generator;
pub mod grouping;
pub mod parser;
pub mod preset;
pub mod template;
pub mod transform;
pub mod types;

pub use bump::{BumpRecommendation, RecommendedBump};
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::ChangelogGenerator;
pub use grouping::GroupingConfig;
pub use parser::{CommitParser, EmojiCommitParser, ParserRules};
pub use preset::{Preset, PresetBuilder, Templates};
pub use template::{expand_template, PlaceholderMap};
pub use transform::{CommitTransform, RenderContext, TransformOutcome};
pub use types::{ChangelogEntry, CommitGroup, CommitRecord, CommitType, RawCommit};
