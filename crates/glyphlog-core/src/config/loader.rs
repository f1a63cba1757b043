//! Locating and reading preset option files

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::PresetOptions;
use super::validation::validate_options;

/// Serialization of an options file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionsFormat {
    Toml,
    Yaml,
}

impl OptionsFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Read and validate the preset options in `path`.
///
/// `.toml` files are read as TOML, anything else as YAML.
pub fn load_options(path: &Path) -> Result<PresetOptions> {
    let format = OptionsFormat::of(path);
    debug!(path = %path.display(), ?format, "reading preset options");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let options: PresetOptions = match format {
        OptionsFormat::Toml => toml::from_str(&content).map_err(ConfigError::TomlError)?,
        OptionsFormat::Yaml => serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?,
    };

    validate_options(&options)?;
    info!(
        path = %path.display(),
        issue_links = options.issue_url_format.is_some(),
        "preset options loaded"
    );
    Ok(options)
}

/// Options files one directory may hold, in lookup order: each known name
/// in `dir` itself, then under `dir/.github`
fn candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    config_file_names()
        .into_iter()
        .flat_map(move |name| [dir.join(name), dir.join(".github").join(name)])
}

/// Nearest options file for `start_dir`, trying it and then each ancestor
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .flat_map(|dir| candidates(dir))
        .find(|path| path.is_file());

    match &found {
        Some(path) => debug!(path = %path.display(), "preset options file found"),
        None => debug!(start_dir = %start_dir.display(), "no preset options file above directory"),
    }
    found
}

/// Find the nearest options file and load it, returning where it was found
pub fn load_options_from_dir(dir: &Path) -> Result<(PresetOptions, PathBuf)> {
    let path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
    load_options(&path).map(|options| (options, path))
}

/// Load preset options or fall back to defaults
pub fn load_options_or_default(dir: &Path) -> (PresetOptions, Option<PathBuf>) {
    match load_options_from_dir(dir) {
        Ok((options, path)) => (options, Some(path)),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "no usable preset options, using defaults");
            (PresetOptions::default(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("glyphlog.toml");
        std::fs::write(&config_path, "userUrlFormat = \"https://x/{{user}}\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("glyphlog.toml");
        let yaml_path = temp.path().join("glyphlog.yaml");
        std::fs::write(&toml_path, "").unwrap();
        std::fs::write(&yaml_path, "{}").unwrap();

        assert_eq!(find_config(temp.path()).unwrap(), toml_path);
    }

    #[test]
    fn test_find_config_in_parent_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("glyphlog.yaml");
        std::fs::write(&config_path, "{}").unwrap();

        let nested = temp.path().join("packages").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested).unwrap(), config_path);
    }

    #[test]
    fn test_load_options_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("glyphlog.toml");
        std::fs::write(
            &config_path,
            "issueUrlFormat = \"https://test.com/issues/{{id}}\"\nunknownKey = 1\n",
        )
        .unwrap();

        let options = load_options(&config_path).unwrap();
        assert_eq!(
            options.issue_url_format.as_deref(),
            Some("https://test.com/issues/{{id}}")
        );
        assert_eq!(options, load_options_from_dir(temp.path()).unwrap().0);
    }

    #[test]
    fn test_load_options_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("glyphlog.yaml");
        std::fs::write(&config_path, "userUrlFormat: \"https://test.com/{{user}}\"\n").unwrap();

        let options = load_options(&config_path).unwrap();
        assert_eq!(options.user_url_format, "https://test.com/{{user}}");
    }

    #[test]
    fn test_closest_directory_wins() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("glyphlog.toml"), "").unwrap();
        let nested = temp.path().join("app");
        std::fs::create_dir_all(&nested).unwrap();
        let near = nested.join(".glyphlog.yaml");
        std::fs::write(&near, "{}").unwrap();

        assert_eq!(find_config(&nested).unwrap(), near);
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(OptionsFormat::of(Path::new("glyphlog.toml")), OptionsFormat::Toml);
        assert_eq!(OptionsFormat::of(Path::new(".glyphlog.yaml")), OptionsFormat::Yaml);
        assert_eq!(OptionsFormat::of(Path::new("glyphlog")), OptionsFormat::Yaml);
    }

    #[test]
    fn test_invalid_options_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("glyphlog.toml"), "commitUrlFormat = \"\"\n").unwrap();

        let (options, path) = load_options_or_default(temp.path());
        assert_eq!(options, PresetOptions::default());
        assert!(path.is_none());
    }

    #[test]
    fn test_default_template_loads_as_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("glyphlog.toml");
        std::fs::write(&config_path, crate::config::DEFAULT_CONFIG_TEMPLATE).unwrap();

        assert_eq!(load_options(&config_path).unwrap(), PresetOptions::default());
    }
}
