//! Scripted in-memory provider for tests.
//!
//! Replies are queued per call; once the queue drains, a standing reply
//! answers every further call.
//!
//! ```ignore
//! let groq = MockAIProvider::named("groq")
//!     .with_error(AIError::rate_limited("429 Too Many Requests"))
//!     .with_response(r#"{"summary":"Crash on save"}"#);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, CompletionRequest, ProviderInfo};

/// Provider double that records every request it receives.
///
/// Clones share their queue and call history, so a test can keep a handle
/// after moving the provider into a registry.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Returned once `responses` is exhausted.
    standing: Arc<Mutex<MockResponse>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(AIError),
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::named("mock")
    }

    /// Provider reporting `name`, answering "Mock response" by default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            standing: Arc::new(Mutex::new(MockResponse::Success(
                "Mock response".to_string(),
            ))),
            info: ProviderInfo::new(name, "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()))
    }

    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Answers every call (after the queue) with this text.
    pub fn always_respond(self, content: impl Into<String>) -> Self {
        *self.standing.lock().unwrap() = MockResponse::Success(content.into());
        self
    }

    /// Fails every call (after the queue) with this error.
    pub fn always_fail(self, error: AIError) -> Self {
        *self.standing.lock().unwrap() = MockResponse::Error(error);
        self
    }

    /// Sleeps this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.standing.lock().unwrap().clone())
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AIError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
