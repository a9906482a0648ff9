//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - One LLM backend behind a prompt-pair interface
//! - `LlmInvoker` - Failover across every configured `AIProvider`

mod ai_provider;
mod llm_invoker;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, FailureClass, InvocationOptions, ProviderInfo,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use llm_invoker::{Invocation, InvokeError, LlmInvoker};
