//! AnalyzeBugHandler - Turns a QA bug description into a structured ticket.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{normalize, prompts, AnalysisPayload, UserStoryContext};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::{CompletionRequest, LlmInvoker};

/// Command to analyze a bug report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeBugCommand {
    pub description: String,
    pub logs: Option<String>,
    pub user_story_context: Option<UserStoryContext>,
}

impl AnalyzeBugCommand {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_logs(mut self, logs: impl Into<String>) -> Self {
        self.logs = Some(logs.into());
        self
    }

    pub fn with_user_story(mut self, story: UserStoryContext) -> Self {
        self.user_story_context = Some(story);
        self
    }
}

/// Handler for bug analysis.
///
/// Only provider exhaustion (or an empty registry) is an error here; a reply
/// that is not valid JSON still produces a payload through the fallback.
pub struct AnalyzeBugHandler {
    invoker: Arc<dyn LlmInvoker>,
}

impl AnalyzeBugHandler {
    pub fn new(invoker: Arc<dyn LlmInvoker>) -> Self {
        Self { invoker }
    }

    pub async fn handle(&self, cmd: AnalyzeBugCommand) -> Result<AnalysisPayload, DomainError> {
        if cmd.description.trim().is_empty() {
            return Err(ValidationError::empty_field("description").into());
        }

        let request = CompletionRequest::new(
            prompts::ANALYZE_SYSTEM_PROMPT,
            prompts::analyze_user_prompt(
                &cmd.description,
                cmd.logs.as_deref(),
                cmd.user_story_context.as_ref(),
            ),
        );

        let invocation = self.invoker.invoke(request).await.map_err(|e| {
            tracing::error!(error = %e, "bug analysis failed");
            DomainError::from(e)
        })?;

        tracing::info!(
            provider = %invocation.provider,
            attempts = invocation.attempted.len(),
            "bug analysis completed"
        );

        Ok(normalize(&invocation.text, &cmd.description))
    }
}
