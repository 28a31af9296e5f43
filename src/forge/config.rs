//! Configuration for the GitHub API connection.
use secrecy::SecretString;
use url::Url;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Page size requested from paginated GitHub endpoints.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Connection settings for authenticating against the GitHub REST API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API base URL (github.com or a GitHub Enterprise instance).
    pub api_url: Url,
    /// Personal access token sent as a bearer token.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_GITHUB_API_URL)
                .expect("default GitHub API URL is valid"),
            token: SecretString::from("".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_remote_config() {
        let remote = RemoteConfig::default();
        assert_eq!(remote.api_url.as_str(), "https://api.github.com/");
        assert!(remote.token.expose_secret().is_empty());
    }
}
