//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        request::{
            GetRepositoryRequest, ListReleasesRequest, ListRepositoriesRequest,
        },
        traits::Forge,
        types::{Release, Repository},
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        Self { forge }
    }

    /// List the organization's repositories ordered by activity, with pinned
    /// repositories first, truncated to `limit` (0 keeps everything).
    ///
    /// A failed organization listing aborts; a pinned repository that cannot
    /// be fetched is skipped with a warning.
    pub async fn list_active_repositories(
        &self,
        org: &str,
        limit: usize,
        pinned: &[String],
    ) -> Result<Vec<Repository>> {
        let mut listed = self
            .forge
            .list_repositories(ListRepositoriesRequest { org: org.into() })
            .await?;

        rank_by_activity(&mut listed);

        let mut repositories: Vec<Repository> = vec![];

        for name in pinned {
            if repositories.iter().any(|r| r.name.eq_ignore_ascii_case(name)) {
                continue;
            }

            let req = GetRepositoryRequest {
                owner: org.into(),
                name: name.clone(),
            };

            match self.forge.get_repository(req).await {
                Ok(repo) => {
                    info!("added pinned repository {}", repo.full_name());
                    repositories.push(repo);
                }
                Err(err) => warn!(
                    "could not fetch pinned repository {org}/{name}: {err}"
                ),
            }
        }

        for repo in listed {
            if limit > 0 && repositories.len() >= limit {
                break;
            }

            if repositories
                .iter()
                .any(|r| r.name.eq_ignore_ascii_case(&repo.name))
            {
                continue;
            }

            repositories.push(repo);
        }

        if limit > 0 {
            repositories.truncate(limit);
        }

        Ok(repositories)
    }

    /// Fetch the published releases of `repo`, newest first.
    pub async fn get_releases(
        &self,
        repo: &Repository,
        year: i32,
    ) -> Result<Vec<Release>> {
        debug!("getting releases for {} in {year}", repo.full_name());

        self.forge
            .list_releases(ListReleasesRequest {
                owner: repo.owner.clone(),
                name: repo.name.clone(),
                year,
            })
            .await
    }
}

/// Order by activity descending, then by name so equal scores are stable
/// across runs.
fn rank_by_activity(repos: &mut [Repository]) {
    repos.sort_by(|a, b| {
        b.activity.cmp(&a.activity).then_with(|| a.name.cmp(&b.name))
    });
}
