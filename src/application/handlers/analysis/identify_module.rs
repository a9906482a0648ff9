//! IdentifyModuleHandler - Names the component most likely affected by a bug.

use std::sync::Arc;

use crate::domain::analysis::prompts;
use crate::ports::{CompletionRequest, InvocationOptions, LlmInvoker};

/// Answer used whenever the model cannot be reached.
pub const UNKNOWN_MODULE: &str = "Unknown";

const IDENTIFY_TEMPERATURE: f32 = 0.2;
const IDENTIFY_MAX_TOKENS: u32 = 50;

/// Handler for module identification. Never fails.
pub struct IdentifyModuleHandler {
    invoker: Arc<dyn LlmInvoker>,
}

impl IdentifyModuleHandler {
    pub fn new(invoker: Arc<dyn LlmInvoker>) -> Self {
        Self { invoker }
    }

    pub async fn handle(&self, description: &str, available_components: &[String]) -> String {
        let request = CompletionRequest::new(
            prompts::IDENTIFY_MODULE_SYSTEM_PROMPT,
            prompts::identify_module_user_prompt(description, available_components),
        )
        .with_options(
            InvocationOptions::new()
                .with_temperature(IDENTIFY_TEMPERATURE)
                .with_max_tokens(IDENTIFY_MAX_TOKENS),
        );

        match self.invoker.invoke(request).await {
            Ok(invocation) => invocation.text.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "module identification failed");
                UNKNOWN_MODULE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{FailoverInvoker, MockAIProvider, ProviderRegistry};
    use crate::ports::AIError;

    fn handler_for(provider: &MockAIProvider) -> IdentifyModuleHandler {
        let registry = ProviderRegistry::new().with_provider("groq", Arc::new(provider.clone()));
        IdentifyModuleHandler::new(Arc::new(FailoverInvoker::new(registry)))
    }

    #[tokio::test]
    async fn returns_trimmed_module_name() {
        let provider = MockAIProvider::named("groq").with_response("  Authentication\n");

        let module = handler_for(&provider)
            .handle("Login fails", &["Authentication".to_string()])
            .await;

        assert_eq!(module, "Authentication");
    }

    #[tokio::test]
    async fn uses_low_temperature_and_short_reply() {
        let provider = MockAIProvider::named("groq").with_response("Cart");

        handler_for(&provider).handle("Cart total wrong", &[]).await;

        let options = &provider.get_calls()[0].options;
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.max_tokens, Some(50));
    }

    #[tokio::test]
    async fn failure_yields_unknown() {
        let provider = MockAIProvider::named("groq").always_fail(AIError::unavailable("down"));

        let module = handler_for(&provider).handle("Cart total wrong", &[]).await;

        assert_eq!(module, UNKNOWN_MODULE);
    }
}
