//! Turns the filtered releases into newsletter content with a single
//! text-generation call.
use log::*;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    NewsletterError, Result,
    analyzer::InclusionRule,
    forge::types::{Release, Repository},
    generator::{
        prompt::{self, PROMPT_TEMPLATE_NAME},
        traits::{GenerationRequest, TextGenerator},
    },
};

static SUBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[#*_\s]*subject(?:\s+line)?[*_\s]*:[*_\s]*(?<value>.+?)[*_\s]*$")
        .unwrap()
});

static PREVIEW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[#*_\s]*preview(?:\s+text)?[*_\s]*:[*_\s]*(?<value>.+?)[*_\s]*$")
        .unwrap()
});

/// One analyzed repository and the releases that survived filtering.
#[derive(Debug, Clone)]
pub struct DigestEntry {
    pub repository: Repository,
    pub rule: InclusionRule,
    pub releases: Vec<Release>,
}

/// Everything collected for the year, in listing order.
#[derive(Debug, Clone)]
pub struct ReleaseDigest {
    pub organization: String,
    pub year: i32,
    pub core_repo: String,
    pub entries: Vec<DigestEntry>,
}

impl ReleaseDigest {
    pub fn new(
        organization: impl Into<String>,
        year: i32,
        core_repo: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            year,
            core_repo: core_repo.into(),
            entries: vec![],
        }
    }

    pub fn push(
        &mut self,
        repository: Repository,
        rule: InclusionRule,
        releases: Vec<Release>,
    ) {
        self.entries.push(DigestEntry {
            repository,
            rule,
            releases,
        });
    }

    /// Repositories analyzed, whether or not any release was included.
    pub fn repository_count(&self) -> usize {
        self.entries.len()
    }

    /// Releases included across all repositories.
    pub fn release_count(&self) -> usize {
        self.entries.iter().map(|e| e.releases.len()).sum()
    }
}

/// Newsletter text split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub subject: String,
    /// Empty when the generated text has no preview line.
    pub preview: String,
    pub body: String,
}

impl GeneratedContent {
    /// Split generated text into subject, preview and body.
    ///
    /// Leading `Subject:` and `Preview:` lines are recognized with or without
    /// Markdown emphasis. Without a subject line the first non-blank line
    /// becomes the subject, minus any heading markers; headings further down
    /// stay in the body.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.trim().lines().collect();

        let mut subject: Option<String> = None;
        let mut preview: Option<String> = None;
        let mut body_start = 0;

        for (index, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                body_start = index + 1;
                continue;
            }

            if subject.is_none()
                && let Some(captures) = SUBJECT_REGEX.captures(trimmed)
            {
                subject = Some(captures["value"].to_string());
                body_start = index + 1;
                continue;
            }

            if preview.is_none()
                && let Some(captures) = PREVIEW_REGEX.captures(trimmed)
            {
                preview = Some(captures["value"].to_string());
                body_start = index + 1;
                continue;
            }

            break;
        }

        let mut body_lines = lines[body_start..].to_vec();

        let subject = match subject {
            Some(subject) => subject,
            None => {
                let position = body_lines
                    .iter()
                    .position(|line| !line.trim().is_empty())
                    .ok_or_else(|| {
                        NewsletterError::generation("generated text is empty")
                    })?;

                let line = body_lines.remove(position);
                line.trim().trim_start_matches('#').trim().to_string()
            }
        };

        let body = body_lines.join("\n").trim().to_string();

        if subject.is_empty() || body.is_empty() {
            return Err(NewsletterError::generation(
                "generated text has no usable subject and body",
            ));
        }

        Ok(Self {
            subject,
            preview: preview.unwrap_or_default(),
            body,
        })
    }
}

/// Builds the prompt, calls the generator once and parses the answer.
pub struct Summarizer {
    generator: Box<dyn TextGenerator>,
    tera: tera::Tera,
    release_limit: usize,
}

impl Summarizer {
    /// Compiles `template` up front so a broken template fails before any
    /// network call.
    ///
    /// `release_limit` caps the releases listed in the prompt, 0 for none.
    pub fn new(
        generator: Box<dyn TextGenerator>,
        template: &str,
        release_limit: usize,
    ) -> Result<Self> {
        let mut tera = tera::Tera::default();
        tera.add_raw_template(PROMPT_TEMPLATE_NAME, template)?;

        Ok(Self {
            generator,
            tera,
            release_limit,
        })
    }

    pub async fn summarize(
        &self,
        digest: &ReleaseDigest,
    ) -> Result<GeneratedContent> {
        let request = GenerationRequest {
            system: prompt::system_prompt(&digest.organization),
            prompt: prompt::render(&self.tera, digest, self.release_limit)?,
        };

        info!(
            "generating newsletter content from {} releases",
            digest.release_count()
        );

        let text = self.generator.generate(request).await?;

        let content = GeneratedContent::parse(&text)?;

        if content.preview.is_empty() {
            warn!("generated text has no preview line");
        }

        debug!("generated subject: {}", content.subject);

        Ok(content)
    }
}
