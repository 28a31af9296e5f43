//! Semantic version classification of release tags.
use semver::Version;
use serde::Serialize;

/// How significant a release is, judged from its tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionSignificance {
    /// `x.0.0`
    Major,
    /// `x.y.0` with y > 0
    Minor,
    /// any non-zero patch component
    Patch,
    /// any pre-release identifier, e.g. `1.3.0-rc.1`
    Prerelease,
}

impl VersionSignificance {
    pub fn is_major_or_minor(&self) -> bool {
        matches!(self, Self::Major | Self::Minor)
    }
}

/// Parse a tag such as `v1.3.0` into a semantic version. A single leading
/// `v` or `V` is ignored.
pub fn parse_tag(tag: &str) -> Option<Version> {
    let trimmed = tag.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    Version::parse(stripped).ok()
}

/// Classify a tag, or `None` when it is not a semantic version.
pub fn classify(tag: &str) -> Option<VersionSignificance> {
    let version = parse_tag(tag)?;

    let significance = if !version.pre.is_empty() {
        VersionSignificance::Prerelease
    } else if version.patch != 0 {
        VersionSignificance::Patch
    } else if version.minor != 0 {
        VersionSignificance::Minor
    } else {
        VersionSignificance::Major
    };

    Some(significance)
}
