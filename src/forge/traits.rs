//! Traits related to the remote release source
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        request::{
            GetRepositoryRequest, ListReleasesRequest, ListRepositoriesRequest,
        },
        types::{Release, Repository},
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge {
    async fn list_repositories(
        &self,
        req: ListRepositoriesRequest,
    ) -> Result<Vec<Repository>>;
    async fn get_repository(
        &self,
        req: GetRepositoryRequest,
    ) -> Result<Repository>;
    async fn list_releases(
        &self,
        req: ListReleasesRequest,
    ) -> Result<Vec<Release>>;
}
