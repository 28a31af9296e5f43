//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures standing in for data returned by the
//! GitHub and text-generation APIs.
use chrono::{DateTime, NaiveDate, Utc};
use secrecy::SecretString;
use std::path::Path;

use crate::{
    config::NewsletterConfig,
    forge::{
        config::RemoteConfig,
        types::{Release, Repository},
    },
    generator::config::GeneratorConfig,
};

/// Creates a repository fixture.
///
/// # Example
/// ```ignore
/// let repo = repository("acme", "core", 500);
/// assert_eq!(repo.full_name(), "acme/core");
/// ```
pub fn repository(owner: &str, name: &str, activity: u64) -> Repository {
    Repository {
        owner: owner.to_string(),
        name: name.to_string(),
        activity,
    }
}

/// Creates a release published at noon UTC on `date` (`YYYY-MM-DD`).
pub fn release(repository: &str, tag: &str, date: &str) -> Release {
    let published_at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc();

    release_with_time(repository, tag, published_at)
}

/// Creates a release published at an exact RFC 3339 timestamp.
pub fn release_at(repository: &str, tag: &str, timestamp: &str) -> Release {
    let published_at = DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc);

    release_with_time(repository, tag, published_at)
}

fn release_with_time(
    repository: &str,
    tag: &str,
    published_at: DateTime<Utc>,
) -> Release {
    Release {
        repository: repository.to_string(),
        tag: tag.to_string(),
        title: format!("Release {tag}"),
        body: format!("## Changes\n- notes for {tag}"),
        published_at,
    }
}

/// Creates a run configuration for the `acme` organization writing into
/// `output_dir`.
pub fn create_test_config(output_dir: &Path) -> NewsletterConfig {
    NewsletterConfig {
        organization: "acme".to_string(),
        year: 2024,
        repo_limit: 5,
        core_repo: "acme/core".to_string(),
        pinned_repos: vec![],
        output_path: output_dir.join("acme_newsletter_2024.md"),
        prompt_template: None,
        prompt_release_limit: 10,
        remote: RemoteConfig {
            token: SecretString::from("ghp_test".to_string()),
            ..Default::default()
        },
        generator: GeneratorConfig {
            api_key: SecretString::from("sk-ant-test".to_string()),
            ..Default::default()
        },
    }
}

/// Generated text in the shape the built-in prompt asks for.
pub fn generated_text() -> String {
    [
        "Subject: Acme 2024: faster search and new SDKs",
        "Preview: Everything developers need to know about this year's releases",
        "",
        "## What's new",
        "",
        "- **Core 1.3.0** brings faster indexing",
        "",
        "## Breaking changes",
        "",
        "None this year.",
    ]
    .join("\n")
}

/// Fixed generation timestamp so rendered output is reproducible.
pub fn generated_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-02T09:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}
