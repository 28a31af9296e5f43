//! Traits related to text-generation backends
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::Result;

/// A single prompt/response exchange with no conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Framing instructions sent as the system prompt.
    pub system: String,
    /// The user message.
    pub prompt: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator {
    /// Generate text for `req`. Fails with a generation error when the call
    /// fails or yields no text.
    async fn generate(&self, req: GenerationRequest) -> Result<String>;
}
