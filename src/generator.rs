//! Text generation: prompt construction, the Anthropic client and parsing of
//! the generated newsletter.
pub mod anthropic;
pub mod config;
pub mod prompt;
pub mod summarizer;
pub mod traits;

pub use summarizer::{GeneratedContent, ReleaseDigest, Summarizer};
pub use traits::{GenerationRequest, TextGenerator};
