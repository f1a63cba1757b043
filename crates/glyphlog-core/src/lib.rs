//! Glyphlog Core - Shared foundation for the glyphlog changelog preset
//!
//! This crate provides the error types, preset options, project descriptor
//! loading and release vocabulary used by `glyphlog-changelog`.

pub mod config;
pub mod error;
pub mod project;
pub mod types;

pub use config::PresetOptions;
pub use error::{GlyphlogError, Result};
pub use project::ProjectDescriptor;
pub use types::ReleaseType;
