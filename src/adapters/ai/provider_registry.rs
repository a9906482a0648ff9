//! Provider Registry - the ordered set of usable LLM backends.
//!
//! Built once at startup from [`AiConfig`]: every provider kind is checked
//! against the credential validator in fixed priority order, and the ones that
//! pass are wrapped in their adapter. Rejected kinds are simply absent.
//! The registry is immutable afterwards and safe to share across tasks.

use std::sync::Arc;

use super::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, OpenAIConfig,
    OpenAIProvider,
};
use crate::config::{AiConfig, AiProvider};
use crate::ports::{AIError, AIProvider};

/// One registered backend.
#[derive(Clone)]
pub struct ProviderDescriptor {
    /// Identifier used in logs and failure reports.
    pub name: String,
    /// Adapter that performs the call.
    pub provider: Arc<dyn AIProvider>,
    /// Position in the registry (0 = tried first on a fresh process).
    pub priority: usize,
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Ordered, immutable collection of usable providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider at the next priority slot.
    pub fn with_provider(mut self, name: impl Into<String>, provider: Arc<dyn AIProvider>) -> Self {
        let priority = self.providers.len();
        self.providers.push(ProviderDescriptor {
            name: name.into(),
            provider,
            priority,
        });
        self
    }

    /// Builds the registry from configuration.
    ///
    /// Logs every accepted provider. An empty result is logged as an error;
    /// callers observe it as `NoProvidersConfigured` on every invocation.
    pub fn from_config(config: &AiConfig) -> Self {
        let mut registry = Self::new();

        for kind in AiProvider::ALL {
            let Some(api_key) = config.api_key(kind).filter(|_| config.is_usable(kind)) else {
                tracing::debug!(provider = kind.name(), "provider skipped: no usable API key");
                continue;
            };

            match build_provider(kind, api_key, config) {
                Ok(provider) => {
                    tracing::info!(
                        provider = kind.name(),
                        model = %config.model(kind),
                        priority = registry.len(),
                        "LLM provider configured"
                    );
                    registry = registry.with_provider(kind.name(), provider);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = kind.name(),
                        error = %e,
                        "LLM provider initialization failed"
                    );
                }
            }
        }

        if registry.is_empty() {
            tracing::error!(
                expected = ?AiProvider::ALL.iter().map(|p| p.secret_var()).collect::<Vec<_>>(),
                "no valid LLM providers configured; bug analysis will fail until an API key is set"
            );
        } else {
            tracing::info!(providers = ?registry.names(), "LLM providers ready");
        }

        registry
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ProviderDescriptor> {
        self.providers.get(index)
    }

    /// Provider names in priority order.
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProviderDescriptor> {
        self.providers.iter()
    }
}

/// Creates the adapter for one provider kind.
fn build_provider(
    kind: AiProvider,
    api_key: &str,
    config: &AiConfig,
) -> Result<Arc<dyn AIProvider>, AIError> {
    let model = config.model(kind);
    let timeout = config.timeout();

    let provider: Arc<dyn AIProvider> = match kind {
        AiProvider::Groq => Arc::new(OpenAIProvider::new(
            OpenAIConfig::groq(api_key)
                .with_model(model)
                .with_timeout(timeout),
        )?),
        AiProvider::OpenAI => Arc::new(OpenAIProvider::new(
            OpenAIConfig::new(api_key)
                .with_model(model)
                .with_timeout(timeout),
        )?),
        AiProvider::Anthropic => Arc::new(AnthropicProvider::new(
            AnthropicConfig::new(api_key)
                .with_model(model)
                .with_timeout(timeout),
        )?),
        AiProvider::Gemini => Arc::new(GeminiProvider::new(
            GeminiConfig::new(api_key)
                .with_model(model)
                .with_timeout(timeout),
        )?),
    };
    Ok(provider)
}
