//! CLI argument parsing and run configuration.
//!
//! Every argument is optional and backed by an environment variable, so the
//! tool normally runs with no arguments at all.
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use url::Url;

use crate::{
    NewsletterError, Result,
    config::{
        DEFAULT_CORE_REPO, DEFAULT_ORG, DEFAULT_PINNED_REPOS,
        DEFAULT_REPO_LIMIT, MAX_YEAR, MIN_YEAR, NewsletterConfig,
        default_output_path,
    },
    forge::config::{DEFAULT_GITHUB_API_URL, RemoteConfig},
    generator::{
        config::{
            DEFAULT_ANTHROPIC_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
            DEFAULT_TEMPERATURE, GeneratorConfig,
        },
        prompt::DEFAULT_PROMPT_RELEASE_LIMIT,
    },
};

/// Anthropic API keys start with this prefix.
const ANTHROPIC_KEY_PREFIX: &str = "sk-ant-";
/// Prefix used by placeholder values in example `.env` files.
const PLACEHOLDER_PREFIX: &str = "your_";

/// Generate a yearly release newsletter for a GitHub organization.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "NEWSLETTER_ORG", default_value = DEFAULT_ORG)]
    /// GitHub organization whose repositories are analyzed.
    pub org: String,

    #[arg(long, env = "NEWSLETTER_YEAR")]
    /// Calendar year (UTC) to report on. Defaults to the current year.
    pub year: Option<i32>,

    #[arg(long, env = "NEWSLETTER_REPO_LIMIT", default_value_t = DEFAULT_REPO_LIMIT)]
    /// Maximum number of repositories to analyze. Use 0 for all.
    pub limit: usize,

    #[arg(long, env = "NEWSLETTER_CORE_REPO", default_value = DEFAULT_CORE_REPO)]
    /// Repository (owner/name) restricted to major and minor releases.
    pub core_repo: String,

    #[arg(
        long,
        env = "NEWSLETTER_PINNED_REPOS",
        value_delimiter = ',',
        default_value = DEFAULT_PINNED_REPOS
    )]
    /// Repository names always analyzed first (comma separated).
    pub pinned: Vec<String>,

    #[arg(long, env = "NEWSLETTER_OUTPUT")]
    /// Output Markdown file. Defaults to {org}_newsletter_{year}.md.
    pub output: Option<PathBuf>,

    #[arg(long, env = "NEWSLETTER_PROMPT_TEMPLATE")]
    /// Tera template file replacing the built-in prompt.
    pub prompt_template: Option<PathBuf>,

    #[arg(
        long,
        env = "NEWSLETTER_PROMPT_RELEASE_LIMIT",
        default_value_t = DEFAULT_PROMPT_RELEASE_LIMIT
    )]
    /// Maximum number of releases listed in the prompt. Use 0 for all.
    pub prompt_release_limit: usize,

    #[arg(long, env = "ANTHROPIC_MODEL", default_value = DEFAULT_MODEL)]
    /// Text-generation model.
    pub model: String,

    #[arg(long, env = "ANTHROPIC_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    /// Maximum number of generated tokens.
    pub max_tokens: u32,

    #[arg(long, env = "ANTHROPIC_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    /// Sampling temperature between 0.0 and 1.0.
    pub temperature: f32,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    /// GitHub REST API base URL.
    pub github_api_url: String,

    #[arg(long, env = "ANTHROPIC_API_URL", default_value = DEFAULT_ANTHROPIC_API_URL)]
    /// Anthropic API base URL.
    pub anthropic_api_url: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    /// GitHub personal access token.
    pub github_token: String,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, default_value = "")]
    /// Anthropic API key.
    pub anthropic_api_key: String,

    #[arg(long, env = "NEWSLETTER_DEBUG", default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Validate arguments and resolve them into the run configuration.
    ///
    /// `current_year` is used when no year was given.
    pub fn to_config(&self, current_year: i32) -> Result<NewsletterConfig> {
        let organization = self.org.trim().to_string();

        if organization.is_empty() {
            return Err(NewsletterError::invalid_config(
                "organization must not be empty",
            ));
        }

        let year = self.year.unwrap_or(current_year);

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(NewsletterError::invalid_config(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }

        validate_core_repo(&self.core_repo)?;

        let pinned_repos = self
            .pinned
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect::<Vec<String>>();

        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&organization, year));

        let remote = RemoteConfig {
            api_url: parse_api_url(&self.github_api_url)?,
            token: validate_github_token(&self.github_token)?,
        };

        let generator = GeneratorConfig {
            api_url: parse_api_url(&self.anthropic_api_url)?,
            api_key: validate_anthropic_key(&self.anthropic_api_key)?,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        validate_generation_params(&generator)?;

        Ok(NewsletterConfig {
            organization,
            year,
            repo_limit: self.limit,
            core_repo: self.core_repo.trim().to_string(),
            pinned_repos,
            output_path,
            prompt_template: self.prompt_template.clone(),
            prompt_release_limit: self.prompt_release_limit,
            remote,
            generator,
        })
    }
}

/// Validate API base URLs use HTTP or HTTPS.
fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        NewsletterError::invalid_config(format!("invalid API url {raw}: {e}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(NewsletterError::invalid_config(format!(
            "only http and https schemes are supported for API urls, got {scheme}"
        ))),
    }
}

fn validate_core_repo(core_repo: &str) -> Result<()> {
    match core_repo.trim().split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok(())
        }
        _ => Err(NewsletterError::invalid_config(format!(
            "core repository must be in owner/name form, got {core_repo:?}"
        ))),
    }
}

fn validate_github_token(token: &str) -> Result<SecretString> {
    let token = token.trim();

    if token.is_empty() {
        return Err(NewsletterError::invalid_config(
            "must set GITHUB_TOKEN",
        ));
    }

    Ok(SecretString::from(token.to_string()))
}

fn validate_anthropic_key(key: &str) -> Result<SecretString> {
    let key = key.trim();

    if key.is_empty() {
        return Err(NewsletterError::invalid_config(
            "must set ANTHROPIC_API_KEY",
        ));
    }

    if key.starts_with(PLACEHOLDER_PREFIX) {
        return Err(NewsletterError::invalid_config(
            "ANTHROPIC_API_KEY still holds a placeholder value",
        ));
    }

    if !key.starts_with(ANTHROPIC_KEY_PREFIX) {
        return Err(NewsletterError::invalid_config(format!(
            "ANTHROPIC_API_KEY must start with {ANTHROPIC_KEY_PREFIX}"
        )));
    }

    Ok(SecretString::from(key.to_string()))
}

fn validate_generation_params(config: &GeneratorConfig) -> Result<()> {
    if config.model.trim().is_empty() {
        return Err(NewsletterError::invalid_config("model must not be empty"));
    }

    if config.max_tokens == 0 {
        return Err(NewsletterError::invalid_config(
            "max tokens must be greater than 0",
        ));
    }

    if !(0.0..=1.0).contains(&config.temperature) {
        return Err(NewsletterError::invalid_config(format!(
            "temperature must be between 0.0 and 1.0, got {}",
            config.temperature
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument validation and config resolution.
    use super::*;
    use secrecy::ExposeSecret;

    fn args() -> Args {
        Args {
            org: "meilisearch".into(),
            year: Some(2024),
            limit: DEFAULT_REPO_LIMIT,
            core_repo: DEFAULT_CORE_REPO.into(),
            pinned: vec!["meilisearch-cloud".into()],
            output: None,
            prompt_template: None,
            prompt_release_limit: DEFAULT_PROMPT_RELEASE_LIMIT,
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            github_api_url: DEFAULT_GITHUB_API_URL.into(),
            anthropic_api_url: DEFAULT_ANTHROPIC_API_URL.into(),
            github_token: "ghp_test".into(),
            anthropic_api_key: "sk-ant-test".into(),
            debug: false,
        }
    }

    #[test]
    fn resolves_config_from_args() {
        let config = args().to_config(2030).unwrap();

        assert_eq!(config.organization, "meilisearch");
        assert_eq!(config.year, 2024);
        assert_eq!(config.repo_limit, 5);
        assert_eq!(config.pinned_repos, vec!["meilisearch-cloud"]);
        assert_eq!(
            config.output_path,
            PathBuf::from("meilisearch_newsletter_2024.md")
        );
        assert_eq!(config.remote.token.expose_secret(), "ghp_test");
        assert_eq!(config.generator.api_key.expose_secret(), "sk-ant-test");
    }

    #[test]
    fn defaults_year_to_current_year() {
        let mut args = args();
        args.year = None;

        let config = args.to_config(2031).unwrap();

        assert_eq!(config.year, 2031);
        assert_eq!(
            config.output_path,
            PathBuf::from("meilisearch_newsletter_2031.md")
        );
    }

    #[test]
    fn explicit_output_path_wins() {
        let mut args = args();
        args.output = Some(PathBuf::from("out/news.md"));

        let config = args.to_config(2024).unwrap();

        assert_eq!(config.output_path, PathBuf::from("out/news.md"));
    }

    #[test]
    fn drops_blank_pinned_names() {
        let mut args = args();
        args.pinned = vec!["".into(), " cloud ".into()];

        let config = args.to_config(2024).unwrap();

        assert_eq!(config.pinned_repos, vec!["cloud"]);
    }

    #[test]
    fn requires_github_token() {
        let mut args = args();
        args.github_token = "  ".into();

        let result = args.to_config(2024);

        assert!(matches!(result, Err(NewsletterError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_placeholder_and_malformed_anthropic_keys() {
        for key in ["", "your_anthropic_key", "sk-proj-123"] {
            let mut args = args();
            args.anthropic_api_key = key.into();

            let result = args.to_config(2024);

            assert!(
                matches!(result, Err(NewsletterError::InvalidConfig(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_malformed_core_repo() {
        for core_repo in ["meilisearch", "/meilisearch", "a/b/c", "owner/"] {
            let mut args = args();
            args.core_repo = core_repo.into();

            assert!(args.to_config(2024).is_err(), "{core_repo} accepted");
        }
    }

    #[test]
    fn only_supports_http_and_https_api_urls() {
        let mut args = args();
        args.github_api_url = "ftp://github.example.com".into();
        assert!(args.to_config(2024).is_err());

        let mut args = self::args();
        args.anthropic_api_url = "not a url".into();
        assert!(args.to_config(2024).is_err());
    }

    #[test]
    fn rejects_out_of_range_year_and_generation_params() {
        let mut args = args();
        args.year = Some(1999);
        assert!(args.to_config(2024).is_err());

        let mut args = self::args();
        args.temperature = 1.5;
        assert!(args.to_config(2024).is_err());

        let mut args = self::args();
        args.max_tokens = 0;
        assert!(args.to_config(2024).is_err());
    }

    #[test]
    fn parses_pinned_list_from_flag() {
        let args = Args::try_parse_from([
            "release-newsletter",
            "--pinned",
            "cloud,docs",
            "--github-token",
            "ghp_test",
            "--anthropic-api-key",
            "sk-ant-test",
        ])
        .unwrap();

        assert_eq!(args.pinned, vec!["cloud", "docs"]);
    }

    #[test]
    fn resolves_prompt_release_limit() {
        let config = args().to_config(2024).unwrap();
        assert_eq!(config.prompt_release_limit, DEFAULT_PROMPT_RELEASE_LIMIT);

        let args = Args::try_parse_from([
            "release-newsletter",
            "--prompt-release-limit",
            "0",
            "--github-token",
            "ghp_test",
            "--anthropic-api-key",
            "sk-ant-test",
        ])
        .unwrap();

        assert_eq!(args.to_config(2024).unwrap().prompt_release_limit, 0);
    }
}
