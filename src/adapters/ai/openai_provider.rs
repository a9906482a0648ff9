//! OpenAI Provider - Implementation of AIProvider for OpenAI-compatible chat APIs.
//!
//! Serves both OpenAI itself and Groq, which exposes the same
//! `/chat/completions` contract under a different base URL.
//!
//! # Configuration
//!
//! ```ignore
//! let openai = OpenAIProvider::new(OpenAIConfig::new(api_key).with_model("gpt-4o"))?;
//! let groq = OpenAIProvider::new(OpenAIConfig::groq(groq_key))?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_support::{build_client, check_status, map_send_error};
use crate::ports::{AIError, AIProvider, CompletionRequest, ProviderInfo};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Name reported in logs ("openai", "groq").
    pub name: String,
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use when the request does not override it.
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates an OpenAI configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            name: "openai".to_string(),
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Creates a Groq configuration with the given API key.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            name: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: GROQ_BASE_URL.to_string(),
            ..Self::new(api_key)
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to the chat completions format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: request.options.model_or(&self.config.model).to_string(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: Some(request.system_prompt.clone()),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: Some(request.user_prompt.clone()),
                },
            ],
            temperature: request.options.temperature_or_default(),
            max_tokens: request.options.max_tokens_or_default(),
        }
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AIError> {
        let body = self.to_openai_request(&request);

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AIError::parse("No message content in response"))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.name, &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::InvocationOptions;
    use mockito::Matcher;
    use serde_json::json;

    const KEY: &str = "sk-test-0123456789abcdefghij";

    fn provider_for(server: &mockito::Server) -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new(KEY).with_base_url(server.url())).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.name, "openai");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn groq_config_points_at_groq() {
        let config = OpenAIConfig::groq("gsk_test");
        assert_eq!(config.name, "groq");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn request_carries_both_roles_and_defaults() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k")).unwrap();
        let body = provider.to_openai_request(&CompletionRequest::new("sys", "usr"));

        assert_eq!(body.model, "gpt-4o-mini");
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "system");
        assert_eq!(body.messages[1].content.as_deref(), Some("usr"));
        assert_eq!(body.temperature, 0.3);
        assert_eq!(body.max_tokens, 2000);
    }

    #[test]
    fn request_model_override_wins() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k")).unwrap();
        let request = CompletionRequest::new("sys", "usr")
            .with_options(InvocationOptions::new().with_model("gpt-4o").with_max_tokens(50));
        let body = provider.to_openai_request(&request);

        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.max_tokens, 50);
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", format!("Bearer {}", KEY).as_str())
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"chatcmpl-1","model":"gpt-4o-mini","choices":[{"index":0,"message":{"role":"assistant","content":"{\"summary\":\"x\"}"},"finish_reason":"stop"}],"usage":{"prompt_tokens":3,"completion_tokens":4}}"#,
            )
            .create_async()
            .await;

        let text = provider_for(&server)
            .complete(CompletionRequest::new("sys", "usr"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, r#"{"summary":"x"}"#);
    }

    #[tokio::test]
    async fn complete_propagates_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached for requests"}}"#)
            .create_async()
            .await;

        let err = provider_for(&server)
            .complete(CompletionRequest::new("sys", "usr"))
            .await
            .unwrap_err();

        assert_eq!(err, AIError::rate_limited("Rate limit reached for requests"));
    }

    #[tokio::test]
    async fn empty_choices_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = provider_for(&server)
            .complete(CompletionRequest::new("sys", "usr"))
            .await
            .unwrap_err();

        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn provider_info_reports_name_and_model() {
        let provider = OpenAIProvider::new(OpenAIConfig::groq("gsk_x").with_model("mixtral")).unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "groq");
        assert_eq!(info.model, "mixtral");
    }
}
