//! LLM Invoker Port - failover-aware entry point used by the application layer.
//!
//! Where [`AIProvider`](super::AIProvider) is one backend, an `LlmInvoker`
//! owns every configured backend and decides which one answers.

use async_trait::async_trait;
use thiserror::Error;

use super::CompletionRequest;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for invoking "some" configured LLM.
#[async_trait]
pub trait LlmInvoker: Send + Sync {
    /// Run the request against the configured providers until one answers.
    async fn invoke(&self, request: CompletionRequest) -> Result<Invocation, InvokeError>;

    /// Names of the configured providers, in priority order.
    fn provider_names(&self) -> Vec<String>;
}

/// Successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Generated text, exactly as the provider returned it.
    pub text: String,
    /// Provider that produced `text`.
    pub provider: String,
    /// Every provider tried for this call, in order; the last one is `provider`.
    pub attempted: Vec<String>,
}

/// Failures surfaced to callers. Individual provider failures are absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// No provider passed credential validation at startup.
    #[error("No LLM providers configured. Please add API keys to the environment.")]
    NoProvidersConfigured,

    /// Every configured provider failed for this call.
    #[error("All LLM providers failed. Attempted: {}. Last error: {last_error}", attempted.join(", "))]
    AllProvidersExhausted {
        /// Providers tried, in order.
        attempted: Vec<String>,
        /// Message of the final attempt's error.
        last_error: String,
    },
}

impl From<InvokeError> for DomainError {
    fn from(err: InvokeError) -> Self {
        match &err {
            InvokeError::NoProvidersConfigured => {
                DomainError::new(ErrorCode::NoProvidersConfigured, err.to_string())
            }
            InvokeError::AllProvidersExhausted { attempted, .. } => {
                DomainError::new(ErrorCode::AIProviderError, err.to_string())
                    .with_detail("attempted", attempted.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_error_lists_attempts_in_order() {
        let err = InvokeError::AllProvidersExhausted {
            attempted: vec!["groq".into(), "openai".into()],
            last_error: "quota exceeded".into(),
        };
        assert_eq!(
            err.to_string(),
            "All LLM providers failed. Attempted: groq, openai. Last error: quota exceeded"
        );
    }

    #[test]
    fn invoke_errors_map_to_domain_codes() {
        let none: DomainError = InvokeError::NoProvidersConfigured.into();
        assert_eq!(none.code, ErrorCode::NoProvidersConfigured);

        let exhausted: DomainError = InvokeError::AllProvidersExhausted {
            attempted: vec!["groq".into(), "gemini".into()],
            last_error: "timeout".into(),
        }
        .into();
        assert_eq!(exhausted.code, ErrorCode::AIProviderError);
        assert_eq!(exhausted.details.get("attempted"), Some(&"groq, gemini".to_string()));
    }
}
