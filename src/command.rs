//! Builds the live GitHub and Anthropic clients and executes a run.
use chrono::{DateTime, Utc};
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    config::NewsletterConfig,
    forge::{github::Github, manager::ForgeManager},
    generator::{Summarizer, anthropic::Anthropic, prompt},
    orchestrator::{Orchestrator, RunSummary},
};

/// Generate and write the newsletter described by `config`.
pub async fn execute(
    config: NewsletterConfig,
    generated_at: DateTime<Utc>,
) -> Result<RunSummary> {
    let template =
        prompt::load_template(config.prompt_template.as_deref()).await?;

    let github = Github::new(config.remote.clone())?;
    let anthropic = Anthropic::new(config.generator.clone())?;
    let summarizer = Summarizer::new(
        Box::new(anthropic),
        &template,
        config.prompt_release_limit,
    )?;

    info!(
        "generating {} newsletter for {} (core repository: {})",
        config.year, config.organization, config.core_repo
    );

    let orchestrator = Orchestrator::builder()
        .config(Rc::new(config))
        .forge(Rc::new(ForgeManager::new(Box::new(github))))
        .summarizer(Rc::new(summarizer))
        .build()?;

    let summary = orchestrator.run(generated_at).await?;

    info!(
        "newsletter with {} releases from {} repositories saved to {}",
        summary.release_count,
        summary.repository_count,
        summary.output_path.display()
    );

    Ok(summary)
}
