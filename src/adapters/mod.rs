//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM provider clients, the provider registry and the failover invoker
//! - `http` - axum routes exposing the analysis use cases

pub mod ai;
pub mod http;

pub use ai::{FailoverInvoker, ProviderRegistry};
pub use http::{analysis_router, AnalysisAppState};
