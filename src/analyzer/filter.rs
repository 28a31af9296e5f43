//! Per-repository inclusion rules and the calendar-year rule.
use chrono::{DateTime, Datelike, Utc};
use log::*;

use crate::{analyzer::version::classify, forge::types::Release};

/// Which releases of a repository make it into the newsletter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionRule {
    /// Only tags that parse as major or minor semantic versions.
    MajorMinorOnly,
    /// Every release, whatever its tag looks like.
    All,
}

impl InclusionRule {
    pub fn includes(&self, release: &Release) -> bool {
        match self {
            Self::MajorMinorOnly => classify(&release.tag)
                .is_some_and(|significance| significance.is_major_or_minor()),
            Self::All => true,
        }
    }
}

/// Whether `published_at` falls within the calendar year, evaluated in UTC:
/// `[YYYY-01-01T00:00:00Z, YYYY-12-31T23:59:59Z]`.
pub fn published_in_year(published_at: &DateTime<Utc>, year: i32) -> bool {
    published_at.year() == year
}

/// Applies the year rule and the repository's inclusion rule.
#[derive(Debug, Clone)]
pub struct ReleaseFilter {
    year: i32,
    core_repo: String,
}

impl ReleaseFilter {
    /// `core_repo` is the `owner/name` filtered to major and minor releases.
    pub fn new(year: i32, core_repo: impl Into<String>) -> Self {
        Self {
            year,
            core_repo: core_repo.into(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Rule for a repository, matched case-insensitively on `owner/name`.
    pub fn rule_for(&self, full_name: &str) -> InclusionRule {
        if self.core_repo.eq_ignore_ascii_case(full_name) {
            InclusionRule::MajorMinorOnly
        } else {
            InclusionRule::All
        }
    }

    /// Keep the releases of `full_name` that pass both rules, preserving
    /// their order.
    pub fn apply(
        &self,
        full_name: &str,
        releases: Vec<Release>,
    ) -> Vec<Release> {
        let rule = self.rule_for(full_name);

        releases
            .into_iter()
            .filter(|release| {
                if !published_in_year(&release.published_at, self.year) {
                    return false;
                }

                let included = rule.includes(release);

                if !included {
                    debug!(
                        "skipping {} {}: excluded by {:?}",
                        full_name, release.tag, rule
                    );
                }

                included
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{release, release_at};

    fn tags(releases: &[Release]) -> Vec<&str> {
        releases.iter().map(|r| r.tag.as_str()).collect()
    }

    #[test]
    fn core_repository_keeps_major_and_minor_releases() {
        let filter = ReleaseFilter::new(2024, "acme/core");
        let releases = vec![
            release("acme/core", "1.3.0", "2024-06-10"),
            release("acme/core", "1.2.1", "2024-04-10"),
            release("acme/core", "1.2.0", "2024-03-10"),
        ];

        let filtered = filter.apply("acme/core", releases);

        assert_eq!(tags(&filtered), vec!["1.3.0", "1.2.0"]);
    }

    #[test]
    fn core_repository_excludes_patch_releases() {
        let filter = ReleaseFilter::new(2024, "acme/core");
        let releases = vec![
            release("acme/core", "v1.3.2", "2024-07-01"),
            release("acme/core", "v1.3.0", "2024-06-01"),
        ];

        let filtered = filter.apply("acme/core", releases);

        assert_eq!(tags(&filtered), vec!["v1.3.0"]);
    }

    #[test]
    fn core_repository_excludes_unparseable_and_prerelease_tags() {
        let filter = ReleaseFilter::new(2024, "acme/core");
        let releases = vec![
            release("acme/core", "nightly", "2024-08-01"),
            release("acme/core", "v1.4.0-rc.1", "2024-07-01"),
            release("acme/core", "v2.0.0", "2024-06-01"),
        ];

        let filtered = filter.apply("acme/core", releases);

        assert_eq!(tags(&filtered), vec!["v2.0.0"]);
    }

    #[test]
    fn other_repositories_keep_every_release() {
        let filter = ReleaseFilter::new(2024, "acme/core");
        let releases = vec![
            release("acme/sdk", "2.0.1", "2024-09-01"),
            release("acme/sdk", "2.0.0", "2024-08-01"),
            release("acme/sdk", "nightly", "2024-07-01"),
        ];

        let filtered = filter.apply("acme/sdk", releases);

        assert_eq!(tags(&filtered), vec!["2.0.1", "2.0.0", "nightly"]);
    }

    #[test]
    fn core_repository_match_ignores_case() {
        let filter = ReleaseFilter::new(2024, "Acme/Core");

        assert_eq!(
            filter.rule_for("acme/core"),
            InclusionRule::MajorMinorOnly
        );
        assert_eq!(filter.rule_for("acme/core-js"), InclusionRule::All);
    }

    #[test]
    fn year_boundaries_are_inclusive_in_utc() {
        let filter = ReleaseFilter::new(2024, "acme/core");
        let releases = vec![
            release_at("acme/sdk", "1.0.3", "2025-01-01T00:00:00Z"),
            release_at("acme/sdk", "1.0.2", "2024-12-31T23:59:59Z"),
            release_at("acme/sdk", "1.0.1", "2024-01-01T00:00:00Z"),
            release_at("acme/sdk", "1.0.0", "2023-12-31T23:59:59Z"),
        ];

        let filtered = filter.apply("acme/sdk", releases);

        assert_eq!(tags(&filtered), vec!["1.0.2", "1.0.1"]);
    }

    #[test]
    fn year_rule_applies_to_core_repository_too() {
        let filter = ReleaseFilter::new(2024, "acme/core");
        let releases = vec![
            release("acme/core", "1.1.0", "2023-11-01"),
            release("acme/core", "1.2.0", "2024-02-01"),
        ];

        let filtered = filter.apply("acme/core", releases);

        assert_eq!(tags(&filtered), vec!["1.2.0"]);
    }
}
