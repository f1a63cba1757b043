//! Project descriptor (`package.json`) handling
//!
//! The descriptor is an optional input to preset construction. It supplies the
//! repository coordinates used in link templates and, when no issue format is
//! configured, the issue tracker base URL.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ProjectError, Result};

/// Conventional file name of the project descriptor
pub const PROJECT_DESCRIPTOR_FILE: &str = "package.json";

/// Subset of a `package.json` relevant to link generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Package name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Repository info
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryField>,

    /// Issue tracker info
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<BugsField>,

    /// Preserve other fields
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

/// `repository` is either a URL/shorthand string or an object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Url(String),
    Detailed {
        url: String,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        directory: Option<String>,
    },
}

/// `bugs` is either a URL string or an object with `url`/`email`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BugsField {
    Url(String),
    Detailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

/// Host, owner and repository name parsed from a repository URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCoordinates {
    /// Scheme and host, e.g. `https://github.com`
    pub host: String,
    /// Owner path (may contain `/` for nested groups)
    pub owner: String,
    /// Repository name without `.git`
    pub repository: String,
}

impl ProjectDescriptor {
    /// Load a descriptor from path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ProjectError::NotFound(path.to_path_buf()))?;

        serde_json::from_str(&content).map_err(|e| {
            ProjectError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Try to load `package.json` from a directory.
    ///
    /// Failure is logged and reported as `None`; callers continue without the
    /// descriptor.
    pub fn discover(dir: &Path) -> Option<Self> {
        let path = dir.join(PROJECT_DESCRIPTOR_FILE);
        match Self::load(&path) {
            Ok(descriptor) => {
                debug!(path = %path.display(), "loaded project descriptor");
                Some(descriptor)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "no project descriptor, issue links derived from it are disabled");
                None
            }
        }
    }

    /// Repository URL normalized to `https://host/owner/repo`
    pub fn repository_url(&self) -> Option<String> {
        let raw = match self.repository.as_ref()? {
            RepositoryField::Url(url) => url.as_str(),
            RepositoryField::Detailed { url, .. } => url.as_str(),
        };
        normalize_repository_url(raw)
    }

    /// Host/owner/repository parsed from the repository URL
    pub fn repository_coordinates(&self) -> Option<RepositoryCoordinates> {
        let url = Url::parse(&self.repository_url()?).ok()?;
        let host = format!("{}://{}", url.scheme(), url.host_str()?);

        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
        let (repository, owner) = segments.split_last()?;
        if owner.is_empty() {
            return None;
        }

        Some(RepositoryCoordinates {
            host,
            owner: owner.join("/"),
            repository: repository.to_string(),
        })
    }

    /// Issue URL template derived from `bugs.url`, else from the repository URL
    pub fn issue_url_format(&self) -> Option<String> {
        let bugs_url = match &self.bugs {
            Some(BugsField::Url(url)) => Some(url.as_str()),
            Some(BugsField::Detailed { url, .. }) => url.as_deref(),
            None => None,
        };

        if let Some(url) = bugs_url.filter(|u| !u.trim().is_empty()) {
            return Some(format!("{}/{}", url.trim_end_matches('/'), "{{id}}"));
        }

        self.repository_url()
            .map(|url| format!("{}/issues/{}", url, "{{id}}"))
    }
}

/// Normalize the repository spellings npm accepts into an https URL
fn normalize_repository_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let shorthand_hosts = [
        ("github:", "https://github.com"),
        ("gitlab:", "https://gitlab.com"),
        ("bitbucket:", "https://bitbucket.org"),
    ];
    for (prefix, host) in shorthand_hosts {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return Some(format!("{}/{}", host, rest.trim_end_matches(".git")));
        }
    }

    // scp-like `git@host:owner/repo.git`
    if let Some(rest) = raw.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        return Some(format!(
            "https://{}/{}",
            host,
            path.trim_end_matches(".git")
        ));
    }

    // bare `owner/repo` means GitHub
    if !raw.contains(':') && raw.matches('/').count() == 1 {
        return Some(format!("https://github.com/{}", raw.trim_end_matches(".git")));
    }

    let without_plus = raw.strip_prefix("git+").unwrap_or(raw);
    let url = Url::parse(without_plus).ok()?;
    let scheme = if url.scheme() == "http" { "http" } else { "https" };
    let host = url.host_str()?;
    let path = url.path().trim_end_matches('/').trim_end_matches(".git");
    Some(format!("{}://{}{}", scheme, host, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn descriptor(json: &str) -> ProjectDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_repository_string_forms() {
        let cases = [
            ("https://github.com/acme/widgets.git", "https://github.com/acme/widgets"),
            ("git+https://github.com/acme/widgets.git", "https://github.com/acme/widgets"),
            ("git@gitlab.com:acme/widgets.git", "https://gitlab.com/acme/widgets"),
            ("ssh://git@github.com/acme/widgets.git", "https://github.com/acme/widgets"),
            ("github:acme/widgets", "https://github.com/acme/widgets"),
            ("acme/widgets", "https://github.com/acme/widgets"),
        ];

        for (raw, expected) in cases {
            assert_eq!(normalize_repository_url(raw).as_deref(), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_repository_coordinates_from_object() {
        let project = descriptor(
            r#"{"name": "widgets", "repository": {"type": "git", "url": "https://gitlab.com/acme/tools/widgets.git"}}"#,
        );

        let coords = project.repository_coordinates().unwrap();
        assert_eq!(coords.host, "https://gitlab.com");
        assert_eq!(coords.owner, "acme/tools");
        assert_eq!(coords.repository, "widgets");
    }

    #[test]
    fn test_issue_url_prefers_bugs() {
        let project = descriptor(
            r#"{"repository": "acme/widgets", "bugs": {"url": "https://tracker.acme.dev/issues/"}}"#,
        );
        assert_eq!(
            project.issue_url_format().as_deref(),
            Some("https://tracker.acme.dev/issues/{{id}}")
        );
    }

    #[test]
    fn test_issue_url_from_repository() {
        let project = descriptor(r#"{"repository": "acme/widgets"}"#);
        assert_eq!(
            project.issue_url_format().as_deref(),
            Some("https://github.com/acme/widgets/issues/{{id}}")
        );
    }

    #[test]
    fn test_no_repository_no_issue_url() {
        let project = descriptor(r#"{"name": "widgets"}"#);
        assert!(project.issue_url_format().is_none());
        assert!(project.repository_coordinates().is_none());
    }

    #[test]
    fn test_discover_missing_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(ProjectDescriptor::discover(temp.path()).is_none());
    }

    #[test]
    fn test_discover_unparseable_is_none() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(PROJECT_DESCRIPTOR_FILE), "{ not json").unwrap();

        assert!(ProjectDescriptor::discover(temp.path()).is_none());
        assert!(ProjectDescriptor::load(&temp.path().join(PROJECT_DESCRIPTOR_FILE)).is_err());
    }

    #[test]
    fn test_discover_loads_descriptor() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(PROJECT_DESCRIPTOR_FILE),
            r#"{"name": "widgets", "version": "1.2.3", "private": true}"#,
        )
        .unwrap();

        let project = ProjectDescriptor::discover(temp.path()).unwrap();
        assert_eq!(project.name.as_deref(), Some("widgets"));
        assert!(project.other.contains_key("private"));
    }
}
