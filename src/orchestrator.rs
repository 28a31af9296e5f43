//! Sequences a newsletter run: list repositories, fetch and filter their
//! releases, generate the content and write the file.
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use log::*;
use std::{path::PathBuf, rc::Rc};

use crate::{
    NewsletterError, Result,
    analyzer::ReleaseFilter,
    config::NewsletterConfig,
    forge::manager::ForgeManager,
    generator::{ReleaseDigest, Summarizer},
    newsletter::Newsletter,
};

#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub config: Rc<NewsletterConfig>,
    pub forge: Rc<ForgeManager>,
    pub summarizer: Rc<Summarizer>,
}

impl OrchestratorParamsBuilder {
    pub fn build(&self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            NewsletterError::invalid_config(format!(
                "Failed to build orchestrator: {}",
                e
            ))
        })?;
        Ok(Orchestrator::new(params))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub repository_count: usize,
    pub release_count: usize,
}

pub struct Orchestrator {
    config: Rc<NewsletterConfig>,
    forge: Rc<ForgeManager>,
    summarizer: Rc<Summarizer>,
    filter: ReleaseFilter,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Self {
        let filter =
            ReleaseFilter::new(params.config.year, &params.config.core_repo);

        Self {
            config: Rc::clone(&params.config),
            forge: Rc::clone(&params.forge),
            summarizer: Rc::clone(&params.summarizer),
            filter,
        }
    }

    /// Run the whole pipeline. Any failure aborts before the output file is
    /// touched.
    pub async fn run(&self, generated_at: DateTime<Utc>) -> Result<RunSummary> {
        let digest = self.collect_releases().await?;

        if digest.release_count() == 0 {
            warn!(
                "no releases found for {} in {}: the newsletter will have \
                 little to report",
                self.config.organization, self.config.year
            );
        }

        let content = self.summarizer.summarize(&digest).await?;

        let newsletter = Newsletter::new(content, &digest, generated_at);

        newsletter.write(self.config.output_path()).await?;

        Ok(RunSummary {
            output_path: self.config.output_path().to_path_buf(),
            repository_count: digest.repository_count(),
            release_count: digest.release_count(),
        })
    }

    /// List the active repositories and keep the releases of each that pass
    /// the filter, one repository at a time.
    pub async fn collect_releases(&self) -> Result<ReleaseDigest> {
        let config = &self.config;

        info!(
            "fetching up to {} active repositories for {}",
            config.repo_limit, config.organization
        );

        let repositories = self
            .forge
            .list_active_repositories(
                &config.organization,
                config.repo_limit,
                &config.pinned_repos,
            )
            .await?;

        if repositories.is_empty() {
            warn!("no repositories found for {}", config.organization);
        }

        let mut digest = ReleaseDigest::new(
            &config.organization,
            self.filter.year(),
            &config.core_repo,
        );

        for repo in repositories {
            let full_name = repo.full_name();
            let rule = self.filter.rule_for(&full_name);

            let fetched = self.forge.get_releases(&repo, self.filter.year()).await?;
            let fetched_count = fetched.len();

            let included = self.filter.apply(&full_name, fetched);

            info!(
                "{full_name}: {} of {fetched_count} releases included ({rule:?})",
                included.len()
            );

            digest.push(repo, rule, included);
        }

        info!(
            "collected {} releases across {} repositories",
            digest.release_count(),
            digest.repository_count()
        );

        Ok(digest)
    }
}
