//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the supported LLM backends,
//! plus the registry and failover invoker that sit on top of them.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat completions (also serves Groq's compatible API)
//! - `AnthropicProvider` - Anthropic Messages API
//! - `GeminiProvider` - Google generateContent API
//! - `MockAIProvider` - Configurable mock for testing
//! - `ProviderRegistry` - Ordered set of providers with usable credentials
//! - `FailoverInvoker` - Tries providers in order, remembering where to start

mod anthropic_provider;
mod failover_invoker;
mod gemini_provider;
mod http_support;
mod mock_provider;
mod openai_provider;
mod provider_registry;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use failover_invoker::FailoverInvoker;
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use provider_registry::{ProviderDescriptor, ProviderRegistry};
