//! Release analysis: semantic version classification of tags and the rules
//! deciding which releases reach the newsletter.

pub mod filter;
pub mod version;

pub use filter::{InclusionRule, ReleaseFilter};
pub use version::VersionSignificance;
