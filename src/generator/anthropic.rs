//! Implements the TextGenerator trait for the Anthropic Messages API
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    NewsletterError, Result,
    generator::{
        config::{ANTHROPIC_VERSION, GeneratorConfig},
        traits::{GenerationRequest, TextGenerator},
    },
};

const MESSAGES_PATH: &str = "v1/messages";
const MAX_TOKENS_STOP_REASON: &str = "max_tokens";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Anthropic Messages API client making one non-streaming request per call.
pub struct Anthropic {
    client: Client,
    endpoint: Url,
    config: GeneratorConfig,
}

impl Anthropic {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| {
                NewsletterError::invalid_config(format!(
                    "API key is not a valid header value: {e}"
                ))
            })?;
        api_key.set_sensitive(true);

        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                NewsletterError::generation(format!(
                    "failed to build HTTP client: {e}"
                ))
            })?;

        let endpoint = messages_endpoint(&config.api_url)?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }
}

/// Join the messages path onto the base URL, keeping any path prefix the
/// base already has.
fn messages_endpoint(base: &Url) -> Result<Url> {
    let mut base = base.clone();

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(MESSAGES_PATH).map_err(|e| {
        NewsletterError::invalid_config(format!(
            "invalid text-generation API url {base}: {e}"
        ))
    })
}

#[async_trait]
impl TextGenerator for Anthropic {
    async fn generate(&self, req: GenerationRequest) -> Result<String> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: &req.system,
            messages: vec![Message {
                role: "user",
                content: &req.prompt,
            }],
        };

        debug!(
            "sending generation request: model: {}, prompt length: {}",
            self.config.model,
            req.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                NewsletterError::generation(format!("request failed: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(NewsletterError::generation(format!(
                "status {status}: {message}"
            )));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            NewsletterError::generation(format!("unreadable response: {e}"))
        })?;

        if parsed.stop_reason.as_deref() == Some(MAX_TOKENS_STOP_REASON) {
            warn!(
                "generation stopped at the {} token limit: output may be truncated",
                self.config.max_tokens
            );
        }

        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<String>>()
            .join("");

        if text.trim().is_empty() {
            return Err(NewsletterError::generation(
                "response contained no text",
            ));
        }

        Ok(text)
    }
}
