//! Error types for the newsletter pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for newsletter generation.
///
/// Every variant is fatal for a run: nothing is retried and no partial
/// newsletter is written.
#[derive(Error, Debug)]
pub enum NewsletterError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // GitHub errors: network, auth, rate limit and non-2xx responses
    #[error("GitHub API request failed: {0}")]
    ApiError(String),

    // Text-generation errors
    #[error("Text generation failed: {0}")]
    GenerationError(String),

    // Output errors
    #[error("Failed to write newsletter to {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using NewsletterError
pub type Result<T> = std::result::Result<T, NewsletterError>;

impl NewsletterError {
    /// Create a GitHub API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Create a text-generation error with context
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::GenerationError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a write error for the given output path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}

// Stray I/O errors outside the writer are wrapped in Other
impl From<std::io::Error> for NewsletterError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Every octocrab failure is a GitHub API failure for this tool
impl From<octocrab::Error> for NewsletterError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => Self::ApiError(format!(
                "status {}: {}",
                source.status_code, source.message
            )),
            _ => Self::ApiError(err.to_string()),
        }
    }
}
