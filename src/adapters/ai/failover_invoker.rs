//! Failover Invoker - tries every registered provider until one answers.
//!
//! The invoker keeps a cursor: the registry index to try first on the next
//! call. A failed attempt moves the cursor past the failed provider; a success
//! leaves it where it is, so the invoker sticks with a working provider
//! instead of rotating on every call.
//!
//! # Example
//!
//! ```ignore
//! let registry = ProviderRegistry::from_config(&config.ai);
//! let invoker = FailoverInvoker::new(registry);
//!
//! let invocation = invoker.invoke(CompletionRequest::new(system, user)).await?;
//! println!("{} answered after {:?}", invocation.provider, invocation.attempted);
//! ```
//!
//! # Concurrency
//!
//! The cursor is an atomic owned by the invoker. Each call reads it once and
//! walks the registry from there, so one call's traversal never depends on
//! another call. A failure advances the cursor with a compare-and-swap from
//! the failed index, which means two overlapping calls that both see the same
//! provider fail move the cursor by one slot, not two.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Instrument;
use uuid::Uuid;

use super::ProviderRegistry;
use crate::ports::{CompletionRequest, FailureClass, Invocation, InvokeError, LlmInvoker};

/// Single-flight failover client over a [`ProviderRegistry`].
#[derive(Debug)]
pub struct FailoverInvoker {
    registry: ProviderRegistry,
    cursor: AtomicUsize,
}

impl FailoverInvoker {
    /// Creates an invoker whose cursor starts at the first provider.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::starting_at(registry, 0)
    }

    /// Creates an invoker whose cursor starts at `index` (wrapped to the registry size).
    pub fn starting_at(registry: ProviderRegistry, index: usize) -> Self {
        let start = if registry.is_empty() {
            0
        } else {
            index % registry.len()
        };
        Self {
            registry,
            cursor: AtomicUsize::new(start),
        }
    }

    /// Index of the provider the next call will try first.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Runs `request` against the registry, starting at the cursor.
    ///
    /// # Errors
    ///
    /// - `NoProvidersConfigured` when the registry is empty (no network call is made)
    /// - `AllProvidersExhausted` when every provider failed for this call
    pub async fn invoke(&self, request: CompletionRequest) -> Result<Invocation, InvokeError> {
        if self.registry.is_empty() {
            tracing::error!("LLM call rejected: no providers configured");
            return Err(InvokeError::NoProvidersConfigured);
        }

        let span = tracing::info_span!("llm_invocation", invocation_id = %Uuid::new_v4());
        self.run_failover(request).instrument(span).await
    }

    async fn run_failover(&self, request: CompletionRequest) -> Result<Invocation, InvokeError> {
        let size = self.registry.len();
        let start = self.cursor() % size;
        let mut attempted = Vec::with_capacity(size);
        let mut last_error = None;

        for (attempt, descriptor) in self.registry.iter().cycle().skip(start).take(size).enumerate() {
            attempted.push(descriptor.name.clone());
            tracing::info!(provider = %descriptor.name, attempt, "attempting LLM call");

            match descriptor.provider.complete(request.clone()).await {
                Ok(text) => {
                    tracing::info!(provider = %descriptor.name, attempt, "LLM call succeeded");
                    return Ok(Invocation {
                        text,
                        provider: descriptor.name.clone(),
                        attempted,
                    });
                }
                Err(err) => {
                    let class = err.failure_class();
                    self.advance_past(descriptor.priority, size);

                    tracing::warn!(
                        provider = %descriptor.name,
                        attempt,
                        failure_class = class.as_str(),
                        error = %err,
                        "LLM provider failed"
                    );
                    if class == FailureClass::Quota {
                        tracing::info!("switching to next provider due to quota/rate limit");
                    } else {
                        tracing::info!("trying next provider");
                    }

                    last_error = Some(err);
                }
            }
        }

        let last_error = last_error.map(|e| e.to_string()).unwrap_or_default();
        tracing::error!(?attempted, %last_error, "all LLM providers failed");
        Err(InvokeError::AllProvidersExhausted {
            attempted,
            last_error,
        })
    }

    /// Moves the cursor from `failed` to the next slot, unless another call already moved it.
    fn advance_past(&self, failed: usize, size: usize) {
        let _ = self.cursor.compare_exchange(
            failed,
            (failed + 1) % size,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }
}

#[async_trait]
impl LlmInvoker for FailoverInvoker {
    async fn invoke(&self, request: CompletionRequest) -> Result<Invocation, InvokeError> {
        FailoverInvoker::invoke(self, request).await
    }

    fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }
}
