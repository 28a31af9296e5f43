#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to list every repository of an organization.
pub struct ListRepositoriesRequest {
    pub org: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to look up a single repository.
pub struct GetRepositoryRequest {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to list the published releases of a repository. Pages that only
/// hold releases published before `year` are not fetched.
pub struct ListReleasesRequest {
    pub owner: String,
    pub name: String,
    pub year: i32,
}
