//! Error types for glyphlog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GlyphlogError
pub type Result<T> = std::result::Result<T, GlyphlogError>;

/// Main error type for glyphlog operations
#[derive(Debug, Error)]
pub enum GlyphlogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Template loading errors
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Project descriptor errors
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading changelog templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template directory does not exist
    #[error("Template directory not found at {0}")]
    DirectoryNotFound(PathBuf),

    /// A template file could not be read
    #[error("Failed to read template {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Project descriptor errors
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Descriptor file not found
    #[error("Project descriptor not found at {0}")]
    NotFound(PathBuf),

    /// Descriptor could not be parsed
    #[error("Failed to parse project descriptor {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },
}
