//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, Page, service::middleware::retry::RetryConfig};
use serde::de::DeserializeOwned;

use crate::{
    Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{
            GetRepositoryRequest, ListReleasesRequest, ListRepositoriesRequest,
        },
        traits::Forge,
        types::{Release, Repository},
    },
};

mod types;

use types::{GithubRelease, GithubRepository, PageParams};

/// GitHub forge implementation using Octocrab for listing organization
/// repositories and their releases.
pub struct Github {
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration. Requests are never retried.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_url.as_str().trim_end_matches('/');
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .add_retry_config(RetryConfig::None)
            .base_uri(base_uri)?
            .build()?;

        Ok(Self { instance })
    }

    async fn first_page<T: DeserializeOwned>(
        &self,
        route: &str,
    ) -> Result<Page<T>> {
        debug!("requesting first page: {route}");

        let page = self
            .instance
            .get(
                route,
                Some(&PageParams {
                    per_page: DEFAULT_PAGE_SIZE,
                }),
            )
            .await?;

        Ok(page)
    }

    async fn next_page<T: DeserializeOwned>(
        &self,
        page: &Page<T>,
    ) -> Result<Option<Page<T>>> {
        if let Some(next) = &page.next {
            debug!("requesting next page: {next}");
        }

        Ok(self.instance.get_page::<T>(&page.next).await?)
    }
}

#[async_trait]
impl Forge for Github {
    async fn list_repositories(
        &self,
        req: ListRepositoriesRequest,
    ) -> Result<Vec<Repository>> {
        let route = format!("/orgs/{}/repos", req.org);
        let mut page: Page<GithubRepository> = self.first_page(&route).await?;
        let mut repositories = vec![];

        loop {
            repositories.extend(
                page.take_items().into_iter().map(Repository::from),
            );

            match self.next_page(&page).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        info!(
            "found {} repositories for organization {}",
            repositories.len(),
            req.org
        );

        Ok(repositories)
    }

    async fn get_repository(
        &self,
        req: GetRepositoryRequest,
    ) -> Result<Repository> {
        let route = format!("/repos/{}/{}", req.owner, req.name);
        let repo: GithubRepository =
            self.instance.get(route, None::<&()>).await?;

        Ok(Repository::from(repo))
    }

    async fn list_releases(
        &self,
        req: ListReleasesRequest,
    ) -> Result<Vec<Release>> {
        let full_name = format!("{}/{}", req.owner, req.name);
        let route = format!("/repos/{full_name}/releases");
        let mut page: Page<GithubRelease> = self.first_page(&route).await?;
        let mut releases = vec![];

        loop {
            let items = page.take_items();

            // GitHub orders releases by creation date, newest first. This
            // assumes a release is published in the year it was created, so
            // a page published entirely before the year ends the search. A
            // draft created before the year and published during it that
            // sits on a later page is missed.
            let exhausted = !items.is_empty()
                && items.iter().all(|r| r.published_before_year(req.year));

            releases.extend(
                items
                    .into_iter()
                    .filter_map(|r| r.into_release(&full_name)),
            );

            if exhausted {
                debug!(
                    "stopping release search for {full_name}: reached releases before {}",
                    req.year
                );
                break;
            }

            match self.next_page(&page).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!("fetched {} releases for {full_name}", releases.len());

        Ok(releases)
    }
}
