use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::types::{Release, Repository};

#[derive(Debug, Serialize)]
pub struct PageParams {
    pub per_page: u8,
}

#[derive(Debug, Deserialize)]
pub struct GithubOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GithubRepository {
    pub name: String,
    pub owner: GithubOwner,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
}

impl From<GithubRepository> for Repository {
    fn from(repo: GithubRepository) -> Self {
        Self {
            activity: repo.stargazers_count
                + repo.forks_count
                + repo.watchers_count,
            owner: repo.owner.login,
            name: repo.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl GithubRelease {
    /// Published strictly before January 1 of `year` (UTC). Drafts are never
    /// considered older.
    pub fn published_before_year(&self, year: i32) -> bool {
        self.published_at
            .is_some_and(|published| published.year() < year)
    }

    /// Normalize into a [`Release`]; drafts and unpublished releases yield
    /// `None`.
    pub fn into_release(self, repository: &str) -> Option<Release> {
        if self.draft {
            return None;
        }

        let published_at = self.published_at?;

        let title = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.tag_name.clone());

        Some(Release {
            repository: repository.to_string(),
            tag: self.tag_name,
            title,
            body: self.body.unwrap_or_default(),
            published_at,
        })
    }
}
