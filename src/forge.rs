//! Interface to the GitHub REST API.
//!
//! Lists an organization's repositories and the published releases of each,
//! behind a trait so the pipeline can run against fixture data.

/// Configuration and authentication for the GitHub API.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Ranking, pinning and fetching on top of a [`traits::Forge`].
pub mod manager;

/// Request types passed to forge implementations.
pub mod request;

/// Common traits for forge abstraction.
pub mod traits;

/// Normalized repository and release types.
pub mod types;
