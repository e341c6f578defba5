//! Configuration types for specification rendering.
//!
//! This module provides the configuration structures that control page
//! metadata, repository links, output layout, and external specification
//! resolution. All types implement [`serde::Deserialize`] so a
//! `specup.toml` file can populate any subset of them.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`SiteConfig`] - Page title and description.
//! - [`RepositoryConfig`] - Source repository coordinates for edit/history links.
//! - [`OutputConfig`] - Output directory and asset emission.
//! - [`ExternalSpec`] - A known external specification for tref/xref resolution.
//!
//! # Example
//!
//! ```
//! # use specup::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.site().title(), "Specification");
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Page metadata section.
    #[serde(default)]
    site: SiteConfig,

    /// Source repository section; absent means no edit/history links.
    #[serde(default)]
    repository: Option<RepositoryConfig>,

    /// Output layout section.
    #[serde(default)]
    output: OutputConfig,

    /// Known external specifications for `tref`/`xref` resolution.
    #[serde(default)]
    external_specs: Vec<ExternalSpec>,
}

impl AppConfig {
    /// Returns the site configuration.
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Returns the repository configuration, if one was given.
    pub fn repository(&self) -> Option<&RepositoryConfig> {
        self.repository.as_ref()
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the configured external specifications.
    pub fn external_specs(&self) -> &[ExternalSpec] {
        &self.external_specs
    }

    /// Looks up the external specification with the given id.
    pub fn external_spec(&self, id: &str) -> Option<&ExternalSpec> {
        self.external_specs.iter().find(|spec| spec.id() == id)
    }
}

/// Page metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Page title; defaults to "Specification".
    #[serde(default)]
    title: Option<String>,

    /// One-line description shown under the title.
    #[serde(default)]
    description: Option<String>,
}

impl SiteConfig {
    /// The page title.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Specification")
    }

    /// The page description, if configured.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Coordinates of the repository holding the specification source.
///
/// Drives the edit and history buttons and the repository line in the
/// meta-info panel.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Forge base URL; defaults to GitHub.
    #[serde(default = "RepositoryConfig::default_host")]
    host: String,

    /// Account or organization name.
    account: String,

    /// Repository name.
    repo: String,

    /// Branch the spec source lives on; defaults to `main`.
    #[serde(default = "RepositoryConfig::default_branch")]
    branch: String,

    /// Path of the Markdown source within the repository.
    #[serde(default = "RepositoryConfig::default_source_path")]
    source_path: String,
}

impl RepositoryConfig {
    fn default_host() -> String {
        "https://github.com".to_string()
    }

    fn default_branch() -> String {
        "main".to_string()
    }

    fn default_source_path() -> String {
        "spec.md".to_string()
    }

    /// The forge base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The account or organization name.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// The repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The branch name.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// `account/repo`, as shown in the meta panel.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.account, self.repo)
    }

    /// URL of the repository page.
    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", self.host, self.account, self.repo)
    }

    /// URL for editing the spec source on the forge.
    pub fn edit_url(&self) -> String {
        format!(
            "{}/{}/{}/edit/{}/{}",
            self.host, self.account, self.repo, self.branch, self.source_path
        )
    }

    /// URL of the commit history of the spec source.
    pub fn history_url(&self) -> String {
        format!(
            "{}/{}/{}/commits/{}/{}",
            self.host, self.account, self.repo, self.branch, self.source_path
        )
    }
}

/// Output directory layout.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the generated page is written to.
    #[serde(default = "OutputConfig::default_dir")]
    dir: String,

    /// Whether static assets (css/js) are written next to the page.
    #[serde(default = "OutputConfig::default_assets")]
    assets: bool,
}

impl OutputConfig {
    fn default_dir() -> String {
        "./spec".to_string()
    }

    fn default_assets() -> bool {
        true
    }

    /// The output directory.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Whether static assets are emitted.
    pub fn assets(&self) -> bool {
        self.assets
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            assets: Self::default_assets(),
        }
    }
}

/// An external specification that `tref`/`xref` directives may target.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalSpec {
    /// Identifier used as the first directive argument.
    id: String,

    /// Base URL of the published specification.
    url: String,
}

impl ExternalSpec {
    /// The spec identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The published base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL of a term anchor within this specification.
    pub fn term_url(&self, anchor: &str) -> String {
        format!("{}#term:{}", self.url.trim_end_matches('/'), anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(toml_str: &str) -> AppConfig {
        toml::from_str(toml_str).expect("config should deserialize")
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.site().title(), "Specification");
        assert!(config.site().description().is_none());
        assert!(config.repository().is_none());
        assert_eq!(config.output().dir(), "./spec");
        assert!(config.output().assets());
        assert!(config.external_specs().is_empty());
    }

    #[test]
    fn test_repository_urls() {
        let config = config_from(
            r#"
            [repository]
            account = "example"
            repo = "widget-spec"
            "#,
        );
        let repo = config.repository().unwrap();

        assert_eq!(repo.slug(), "example/widget-spec");
        assert_eq!(
            repo.edit_url(),
            "https://github.com/example/widget-spec/edit/main/spec.md"
        );
        assert_eq!(
            repo.history_url(),
            "https://github.com/example/widget-spec/commits/main/spec.md"
        );
    }

    #[test]
    fn test_repository_overrides() {
        let config = config_from(
            r#"
            [repository]
            host = "https://gitlab.com"
            account = "example"
            repo = "widget-spec"
            branch = "develop"
            source_path = "docs/spec.md"
            "#,
        );
        let repo = config.repository().unwrap();

        assert_eq!(
            repo.edit_url(),
            "https://gitlab.com/example/widget-spec/edit/develop/docs/spec.md"
        );
    }

    #[test]
    fn test_external_spec_lookup() {
        let config = config_from(
            r#"
            [[external_specs]]
            id = "vc-data-model"
            url = "https://www.w3.org/TR/vc-data-model/"
            "#,
        );

        let spec = config.external_spec("vc-data-model").unwrap();
        assert_eq!(
            spec.term_url("issuer"),
            "https://www.w3.org/TR/vc-data-model#term:issuer"
        );
        assert!(config.external_spec("unknown").is_none());
    }
}
