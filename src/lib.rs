pub mod analyzer;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod generator;
pub mod newsletter;
pub mod orchestrator;

pub use cli::Args;
pub use config::NewsletterConfig;
pub use error::{NewsletterError, Result};
pub use orchestrator::RunSummary;

#[cfg(test)]
pub mod test_helpers;
