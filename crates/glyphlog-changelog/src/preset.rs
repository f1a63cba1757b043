//! Preset assembly
//!
//! Bundles the parser rules, the writer options (transform, grouping and
//! partial templates) and the bump rules for a changelog host. Link formats
//! are expanded once here; the partials receive them as literal text.

use std::path::Path;

use glyphlog_core::config::validate_options;
use glyphlog_core::error::TemplateError;
use glyphlog_core::{PresetOptions, ProjectDescriptor, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::bump::RecommendedBump;
use crate::grouping::GroupingConfig;
use crate::parser::{EmojiCommitParser, ParserRules};
use crate::template::{expand_template, PlaceholderMap};
use crate::transform::{CommitTransform, RenderContext};

/// Main template file name
pub const MAIN_TEMPLATE_FILE: &str = "template.hbs";
/// Header partial file name
pub const HEADER_TEMPLATE_FILE: &str = "header.hbs";
/// Commit partial file name
pub const COMMIT_TEMPLATE_FILE: &str = "commit.hbs";
/// Footer partial file name
pub const FOOTER_TEMPLATE_FILE: &str = "footer.hbs";

// Render-time expressions of the host engine
const HOST_EXPR: &str = "{{~@root.host}}";
const OWNER_EXPR: &str = "{{#if this.owner}}{{~this.owner}}{{else}}{{~@root.owner}}{{/if}}";
const REPOSITORY_EXPR: &str =
    "{{#if this.repository}}{{~this.repository}}{{else}}{{~@root.repository}}{{/if}}";
const ISSUE_ID_EXPR: &str = "{{this.issue}}";

/// Raw template texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub main: String,
    pub header: String,
    pub commit: String,
    pub footer: String,
}

impl Templates {
    /// Load the four templates from a directory.
    ///
    /// Any missing or unreadable file fails the whole load.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(TemplateError::DirectoryNotFound(dir.to_path_buf()).into());
        }

        let read = |name: &str| -> Result<String> {
            let path = dir.join(name);
            std::fs::read_to_string(&path)
                .map_err(|source| TemplateError::ReadFailed { path, source }.into())
        };

        let templates = Self {
            main: read(MAIN_TEMPLATE_FILE)?,
            header: read(HEADER_TEMPLATE_FILE)?,
            commit: read(COMMIT_TEMPLATE_FILE)?,
            footer: read(FOOTER_TEMPLATE_FILE)?,
        };
        debug!(dir = %dir.display(), "templates loaded");
        Ok(templates)
    }

    /// Templates shipped with this crate
    pub fn bundled() -> Self {
        Self {
            main: include_str!("../templates/template.hbs").to_string(),
            header: include_str!("../templates/header.hbs").to_string(),
            commit: include_str!("../templates/commit.hbs").to_string(),
            footer: include_str!("../templates/footer.hbs").to_string(),
        }
    }
}

/// Link formats resolved for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkFormats {
    pub user_url_format: String,
    pub issue_url_format: Option<String>,
    pub commit_url_format: String,
    pub compare_url_format: String,
}

impl LinkFormats {
    /// URL of one commit
    pub fn commit_url(&self, hash: &str, placeholders: &PlaceholderMap) -> String {
        expand_template(&self.commit_url_format, &placeholders.clone().with("hash", hash))
    }

    /// URL of one issue, when an issue format is configured
    pub fn issue_url(&self, issue: &str, placeholders: &PlaceholderMap) -> Option<String> {
        let format = self.issue_url_format.as_deref()?;
        Some(expand_template(format, &placeholders.clone().with("id", issue)))
    }

    /// URL comparing two tags
    pub fn compare_url(&self, previous: &str, current: &str, placeholders: &PlaceholderMap) -> String {
        let placeholders = placeholders
            .clone()
            .with("previousTag", previous)
            .with("currentTag", current);
        expand_template(&self.compare_url_format, &placeholders)
    }
}

/// Everything the host needs to write a changelog
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Per-commit transform
    pub transform: CommitTransform,
    /// Grouping and sorting keys
    pub grouping: GroupingConfig,
    /// Main template
    pub main_template: String,
    /// Header partial with the compare link format substituted
    pub header_partial: String,
    /// Commit partial with the commit and issue link formats substituted
    pub commit_partial: String,
    /// Footer partial
    pub footer_partial: String,
}

/// The assembled preset
#[derive(Debug, Clone)]
pub struct Preset {
    /// Commit parsing rules
    pub parser_rules: ParserRules,
    /// Writer options
    pub writer: WriterOptions,
    /// Bump rules
    pub recommended_bump: RecommendedBump,
    /// Link formats in effect
    pub links: LinkFormats,
    /// Repository coordinates derived from the project descriptor
    pub context: RenderContext,
}

impl Preset {
    /// Build a preset from templates on disk
    pub fn load(
        template_dir: &Path,
        options: PresetOptions,
        project: Option<ProjectDescriptor>,
    ) -> Result<Self> {
        let templates = Templates::load(template_dir)?;
        PresetBuilder::new(options).with_project(project).build(templates)
    }

    /// Build a preset from the bundled templates
    pub fn bundled(options: PresetOptions, project: Option<ProjectDescriptor>) -> Result<Self> {
        PresetBuilder::new(options)
            .with_project(project)
            .build(Templates::bundled())
    }

    /// A parser applying this preset's rules
    pub fn parser(&self) -> EmojiCommitParser {
        EmojiCommitParser::with_rules(self.parser_rules.clone())
    }
}

/// Builder for [`Preset`]
#[derive(Debug, Clone)]
pub struct PresetBuilder {
    options: PresetOptions,
    project: Option<ProjectDescriptor>,
}

impl PresetBuilder {
    /// Start from preset options
    pub fn new(options: PresetOptions) -> Self {
        Self {
            options,
            project: None,
        }
    }

    /// Supply the project descriptor, or `None` when it could not be loaded
    pub fn with_project(mut self, project: Option<ProjectDescriptor>) -> Self {
        self.project = project;
        self
    }

    /// Resolve link formats; an explicit issue format wins over the descriptor
    pub fn resolve_links(&self) -> LinkFormats {
        let issue_url_format = self
            .options
            .issue_url_format
            .clone()
            .or_else(|| self.project.as_ref()?.issue_url_format());

        LinkFormats {
            user_url_format: self.options.user_url_format.clone(),
            issue_url_format,
            commit_url_format: self.options.commit_url_format.clone(),
            compare_url_format: self.options.compare_url_format.clone(),
        }
    }

    /// Repository coordinates from the descriptor, if any
    pub fn render_context(&self) -> RenderContext {
        self.project
            .as_ref()
            .and_then(ProjectDescriptor::repository_coordinates)
            .map(|c| RenderContext::new(c.host, c.owner, c.repository))
            .unwrap_or_default()
    }

    /// Assemble the preset
    #[instrument(skip_all, fields(has_project = self.project.is_some()))]
    pub fn build(self, templates: Templates) -> Result<Preset> {
        validate_options(&self.options)?;

        let links = self.resolve_links();
        let context = self.render_context();

        let engine = PlaceholderMap::new()
            .with("host", HOST_EXPR)
            .with("owner", OWNER_EXPR)
            .with("repository", REPOSITORY_EXPR);
        let commit_url_format = expand_template(&links.commit_url_format, &engine);
        let compare_url_format = expand_template(&links.compare_url_format, &engine);

        let header_partial = templates
            .header
            .replace("{{compareUrlFormat}}", &compare_url_format);
        let mut commit_partial = templates
            .commit
            .replace("{{commitUrlFormat}}", &commit_url_format);
        if let Some(issue_format) = &links.issue_url_format {
            let issue_url_format =
                expand_template(issue_format, &engine.clone().with("id", ISSUE_ID_EXPR));
            commit_partial = commit_partial.replace("{{issueUrlFormat}}", &issue_url_format);
        }

        info!(
            issue_links = links.issue_url_format.is_some(),
            "preset assembled"
        );

        Ok(Preset {
            parser_rules: ParserRules::default(),
            writer: WriterOptions {
                transform: CommitTransform::new(
                    links.user_url_format.clone(),
                    links.issue_url_format.clone(),
                ),
                grouping: GroupingConfig::default(),
                main_template: templates.main,
                header_partial,
                commit_partial,
                footer_partial: templates.footer,
            },
            recommended_bump: RecommendedBump,
            links,
            context,
        })
    }
}
