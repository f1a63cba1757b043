//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "glyphlog.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "glyphlog.yaml";

/// Default user mention link format
pub const DEFAULT_USER_URL_FORMAT: &str = "{{host}}/{{user}}";

/// Default commit link format
pub const DEFAULT_COMMIT_URL_FORMAT: &str = "{{host}}/{{owner}}/{{repository}}/commit/{{hash}}";

/// Default tag comparison link format
pub const DEFAULT_COMPARE_URL_FORMAT: &str =
    "{{host}}/{{owner}}/{{repository}}/compare/{{previousTag}}...{{currentTag}}";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".glyphlog.toml",
        ".glyphlog.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# glyphlog preset options
# Placeholders: {{host}} {{owner}} {{repository}} plus the per-link ones below.

userUrlFormat = "{{host}}/{{user}}"
commitUrlFormat = "{{host}}/{{owner}}/{{repository}}/commit/{{hash}}"
compareUrlFormat = "{{host}}/{{owner}}/{{repository}}/compare/{{previousTag}}...{{currentTag}}"
# issueUrlFormat = "{{host}}/{{owner}}/{{repository}}/issues/{{id}}"
"#;
