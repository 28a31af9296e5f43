use chrono::{DateTime, Utc};
use serde::Serialize;

/// A repository normalized from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    /// Stars + forks + watchers; higher means more active.
    pub activity: u64,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A published release normalized from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// `owner/name` of the repository this release belongs to.
    pub repository: String,
    pub tag: String,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}
