//! AI Provider Port - Interface for LLM provider integrations.
//!
//! This port abstracts a single call against one LLM backend (Groq, OpenAI,
//! Anthropic, Gemini), so that the failover layer can drive any backend
//! through the same `(system prompt, user prompt, options)` triple.
//!
//! # Design
//!
//! - Adapters map [`InvocationOptions`] onto their own defaults
//! - Adapters return only the generated text, never the provider envelope
//! - Adapters never swallow errors; they translate them into [`AIError`] and
//!   leave the retry/failover decision to the caller
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<String, AIError> {
//!         Ok(request.user_prompt)
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo-1")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Temperature used when the caller does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Generation budget used when the caller does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Port for AI/LLM provider interactions.
///
/// Implementations connect to external AI services and translate between the
/// provider-specific API and the generic prompt pair.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion and return its plain text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Per-call overrides. Every field is optional; adapters supply defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationOptions {
    /// Model override (otherwise the adapter's configured model).
    pub model: Option<String>,
    /// Sampling temperature (default 0.3).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate (default 2000).
    pub max_tokens: Option<u32>,
}

impl InvocationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model override.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Resolves the model against an adapter default.
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model.as_deref().unwrap_or(default)
    }

    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens_or_default(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

/// Request for AI completion: a system/user prompt pair plus options.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Instructions that frame the model's behaviour.
    pub system_prompt: String,
    /// The task itself.
    pub user_prompt: String,
    pub options: InvocationOptions,
}

impl CompletionRequest {
    /// Creates a new completion request with default options.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            options: InvocationOptions::default(),
        }
    }

    /// Replaces the invocation options.
    pub fn with_options(mut self, options: InvocationOptions) -> Self {
        self.options = options;
        self
    }

    /// Joins both prompts for backends that accept a single prompt only.
    pub fn combined_prompt(&self) -> String {
        format!("{}\n\n{}", self.system_prompt, self.user_prompt)
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "groq", "anthropic").
    pub name: String,
    /// Default model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Coarse failure category, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Quota exhausted, billing problem, HTTP 429 or rate limiting.
    Quota,
    /// Rejected credentials.
    Auth,
    /// Connection, timeout or upstream availability problems.
    Transport,
    Other,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Quota => "quota",
            FailureClass::Auth => "auth",
            FailureClass::Transport => "transport",
            FailureClass::Other => "other",
        }
    }
}

/// Substrings that mark a free-text failure as quota related.
const QUOTA_MARKERS: [&str; 4] = ["quota", "429", "billing", "rate limit"];

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider (HTTP 429).
    #[error("rate limited (429): {message}")]
    RateLimited {
        /// Provider message.
        message: String,
    },

    /// Quota or billing limit reached.
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        /// Provider message.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed: {message}")]
    AuthenticationFailed {
        /// Provider message.
        message: String,
    },

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other backend failure, described by the provider.
    #[error("{0}")]
    Provider(String),
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates a quota exceeded error.
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a free-text provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Classifies the failure for diagnostics.
    ///
    /// Structured variants map directly; free-text variants fall back to
    /// looking for quota markers in the message.
    pub fn failure_class(&self) -> FailureClass {
        match self {
            AIError::RateLimited { .. } | AIError::QuotaExceeded { .. } => FailureClass::Quota,
            AIError::AuthenticationFailed { .. } => FailureClass::Auth,
            AIError::Unavailable { .. } | AIError::Network(_) | AIError::Timeout { .. } => {
                FailureClass::Transport
            }
            AIError::Parse(_) | AIError::InvalidRequest(_) | AIError::Provider(_) => {
                let message = self.to_string().to_lowercase();
                if QUOTA_MARKERS.iter().any(|m| message.contains(m)) {
                    FailureClass::Quota
                } else {
                    FailureClass::Other
                }
            }
        }
    }
}
