//! Run configuration resolved once at startup and passed explicitly to every
//! pipeline component.
use std::path::{Path, PathBuf};

use crate::{
    forge::config::RemoteConfig,
    generator::{config::GeneratorConfig, prompt::DEFAULT_PROMPT_RELEASE_LIMIT},
};

/// Organization whose repositories are analyzed by default.
pub const DEFAULT_ORG: &str = "meilisearch";
/// Default number of repositories analyzed per run.
pub const DEFAULT_REPO_LIMIT: usize = 5;
/// Repository whose releases are restricted to major and minor versions.
pub const DEFAULT_CORE_REPO: &str = "meilisearch/meilisearch";
/// Repositories always placed at the front of the listing.
pub const DEFAULT_PINNED_REPOS: &str = "meilisearch-cloud";
/// Earliest year accepted: GitHub releases do not predate 2008.
pub const MIN_YEAR: i32 = 2008;
/// Latest year accepted.
pub const MAX_YEAR: i32 = 9999;

/// Everything a single newsletter run needs.
#[derive(Debug, Clone)]
pub struct NewsletterConfig {
    /// GitHub organization to analyze.
    pub organization: String,
    /// Calendar year (UTC) whose releases are included.
    pub year: i32,
    /// Maximum number of repositories analyzed, 0 for no limit.
    pub repo_limit: usize,
    /// `owner/name` of the repository filtered to major and minor releases.
    pub core_repo: String,
    /// Repository names within the organization listed before all others.
    pub pinned_repos: Vec<String>,
    /// Markdown file written at the end of the run.
    pub output_path: PathBuf,
    /// Optional Tera template replacing the built-in prompt.
    pub prompt_template: Option<PathBuf>,
    /// Maximum number of releases listed in the prompt, 0 for no limit.
    pub prompt_release_limit: usize,
    /// GitHub connection.
    pub remote: RemoteConfig,
    /// Text-generation connection.
    pub generator: GeneratorConfig,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORG.to_string(),
            year: 2024,
            repo_limit: DEFAULT_REPO_LIMIT,
            core_repo: DEFAULT_CORE_REPO.to_string(),
            pinned_repos: vec![DEFAULT_PINNED_REPOS.to_string()],
            output_path: default_output_path(DEFAULT_ORG, 2024),
            prompt_template: None,
            prompt_release_limit: DEFAULT_PROMPT_RELEASE_LIMIT,
            remote: RemoteConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl NewsletterConfig {
    /// Whether `full_name` names the designated core repository.
    pub fn is_core_repo(&self, full_name: &str) -> bool {
        self.core_repo.eq_ignore_ascii_case(full_name)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Output file used when none is configured, e.g.
/// `meilisearch_newsletter_2024.md`.
pub fn default_output_path(organization: &str, year: i32) -> PathBuf {
    PathBuf::from(format!("{organization}_newsletter_{year}.md"))
}
