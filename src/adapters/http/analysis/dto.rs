//! Data transfer objects for analysis HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisPayload, UserStoryContext};
use crate::domain::foundation::DomainError;

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to analyze a bug report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBugRequest {
    /// Free-text description from QA (required, checked by the handler)
    #[serde(default)]
    pub description: String,
    /// Logs or error output pasted by the reporter
    pub logs: Option<String>,
    /// Linked user story, if any
    pub user_story_context: Option<UserStoryContext>,
}

/// Request to generate test cases for an analyzed bug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestsRequest {
    pub bug_analysis: Option<AnalysisPayload>,
}

/// Request to identify the affected module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyModuleRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub available_components: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeBugResponse {
    pub success: bool,
    pub analysis: AnalysisPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestsResponse {
    pub success: bool,
    pub test_cases: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyModuleResponse {
    pub success: bool,
    pub module: String,
}

/// Liveness report, including which LLM providers are registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub providers: Vec<String>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            serde_json::to_value(&err.details).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}
