//! Configuration for the text-generation API connection.
use secrecy::SecretString;
use url::Url;

/// Default Anthropic API base URL.
pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
/// API version header sent with every Messages request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
/// Upper bound on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
/// Sampling temperature for newsletter prose.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Settings for the Anthropic Messages API client.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API base URL; `/v1/messages` is appended.
    pub api_url: Url,
    /// API key sent in the `x-api-key` header.
    pub api_key: SecretString,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_ANTHROPIC_API_URL)
                .expect("default Anthropic API URL is valid"),
            api_key: SecretString::from("".to_string()),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_served_sonnet_model() {
        let config = GeneratorConfig::default();
        assert_eq!(config.model, "claude-sonnet-4-5");
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.api_url.as_str(), "https://api.anthropic.com/");
    }
}
