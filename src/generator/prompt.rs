//! Prompt construction for the newsletter request.
use log::*;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

use crate::{
    NewsletterError, Result,
    analyzer::InclusionRule,
    generator::summarizer::{DigestEntry, ReleaseDigest},
};

/// Release notes longer than this many characters are cut before they are
/// placed in the prompt.
pub const MAX_BODY_CHARS: usize = 2000;

/// Default number of releases listed in the prompt. Releases past the limit
/// are counted but not listed.
pub const DEFAULT_PROMPT_RELEASE_LIMIT: usize = 10;

/// Name the prompt template is registered under.
pub const PROMPT_TEMPLATE_NAME: &str = "prompt";

/// Built-in user prompt. Variables: `organization`, `year`, `core_repo`,
/// `repository_count`, `release_count`, `prompt_release_count`,
/// `omitted_release_count` and `repositories`, a list of
/// `{ full_name, rule, releases: [{ tag, title, published, body }] }`.
pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"Write the {{ year }} release newsletter for developers who use {{ organization }}.

Context:
- {{ core_repo }} is the core product. Only its major and minor releases are listed below.
- Focus on changes that affect developers building with {{ organization }}.
- Skip internal, administrative and operational changes.

Write an engaging newsletter that:
1. Opens with a short introduction focused on what developers gain this year
2. Highlights the most important improvements to the core product
3. Includes the technical details developers need, with code examples where they help
4. Calls out breaking changes and explains how to migrate
5. Ends with a call to action to upgrade and try the new features

Format the response as Markdown, exactly as follows:
- First line: `Subject: ` followed by a clear technical subject line
- Second line: `Preview: ` followed by one sentence previewing the key improvements
- Then the newsletter body, using `##` headers for each section

Releases ({{ release_count }} across {{ repository_count }} repositories{% if omitted_release_count > 0 %}, showing the first {{ prompt_release_count }}{% endif %}):
{% for repo in repositories %}
### {{ repo.full_name }} ({{ repo.rule }})
{% for release in repo.releases %}
#### {{ release.tag }}: {{ release.title }} ({{ release.published }})

{{ release.body }}
{% endfor %}{% endfor %}"#;

#[derive(Debug, Serialize)]
struct PromptRelease<'a> {
    tag: &'a str,
    title: &'a str,
    published: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct PromptRepository<'a> {
    full_name: String,
    rule: &'static str,
    releases: Vec<PromptRelease<'a>>,
}

#[derive(Debug, Serialize)]
struct PromptContext<'a> {
    organization: &'a str,
    year: i32,
    core_repo: &'a str,
    repository_count: usize,
    release_count: usize,
    prompt_release_count: usize,
    omitted_release_count: usize,
    repositories: Vec<PromptRepository<'a>>,
}

/// System prompt framing the model as the organization's developer
/// communications writer.
pub fn system_prompt(organization: &str) -> String {
    format!(
        "You are a product marketing expert for {organization}, skilled at \
         explaining technical improvements to developers. You write accurate, \
         concise newsletters and never invent features that are not in the \
         release notes you are given."
    )
}

/// Read a user-supplied prompt template. Missing or unreadable files are
/// configuration errors.
pub async fn load_template(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_PROMPT_TEMPLATE.to_string());
    };

    fs::read_to_string(path).await.map_err(|e| {
        NewsletterError::invalid_config(format!(
            "cannot read prompt template {}: {e}",
            path.display()
        ))
    })
}

/// Render the registered prompt template for `digest`. Repositories without
/// included releases are left out of the release listing but still counted.
///
/// At most `release_limit` releases are listed (0 lists all of them), taken
/// in digest order: repositories by rank, releases newest first.
pub fn render(
    tera: &tera::Tera,
    digest: &ReleaseDigest,
    release_limit: usize,
) -> Result<String> {
    let mut remaining = match release_limit {
        0 => usize::MAX,
        limit => limit,
    };

    let mut repositories = vec![];

    for entry in &digest.entries {
        if remaining == 0 {
            break;
        }

        if entry.releases.is_empty() {
            continue;
        }

        let shown = entry.releases.len().min(remaining);
        remaining -= shown;
        repositories.push(prompt_repository(entry, shown));
    }

    let prompt_release_count: usize =
        repositories.iter().map(|r| r.releases.len()).sum();
    let omitted_release_count = digest.release_count() - prompt_release_count;

    if omitted_release_count > 0 {
        warn!(
            "prompt lists the first {prompt_release_count} of {} releases",
            digest.release_count()
        );
    }

    let context = PromptContext {
        organization: &digest.organization,
        year: digest.year,
        core_repo: &digest.core_repo,
        repository_count: digest.repository_count(),
        release_count: digest.release_count(),
        prompt_release_count,
        omitted_release_count,
        repositories,
    };

    let context = tera::Context::from_serialize(&context)?;

    Ok(tera.render(PROMPT_TEMPLATE_NAME, &context)?)
}

fn prompt_repository(entry: &DigestEntry, take: usize) -> PromptRepository<'_> {
    let rule = match entry.rule {
        InclusionRule::MajorMinorOnly => "major and minor releases only",
        InclusionRule::All => "all releases",
    };

    PromptRepository {
        full_name: entry.repository.full_name(),
        rule,
        releases: entry
            .releases
            .iter()
            .take(take)
            .map(|release| PromptRelease {
                tag: &release.tag,
                title: &release.title,
                published: release.published_at.format("%Y-%m-%d").to_string(),
                body: truncate_chars(release.body.trim(), MAX_BODY_CHARS),
            })
            .collect(),
    }
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
