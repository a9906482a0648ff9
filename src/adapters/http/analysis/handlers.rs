//! HTTP handlers for analysis endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::application::handlers::analysis::{
    AnalyzeBugCommand, AnalyzeBugHandler, GenerateTestCasesHandler, IdentifyModuleHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::LlmInvoker;

use super::dto::{
    AnalyzeBugRequest, AnalyzeBugResponse, ErrorResponse, GenerateTestsRequest,
    GenerateTestsResponse, HealthResponse, IdentifyModuleRequest, IdentifyModuleResponse,
};

/// Application state for analysis endpoints.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub invoker: Arc<dyn LlmInvoker>,
    pub analyze_bug: Arc<AnalyzeBugHandler>,
    pub identify_module: Arc<IdentifyModuleHandler>,
    pub generate_test_cases: Arc<GenerateTestCasesHandler>,
}

impl AnalysisAppState {
    /// Wires every handler to the same invoker, so they share one cursor.
    pub fn new(invoker: Arc<dyn LlmInvoker>) -> Self {
        Self {
            analyze_bug: Arc::new(AnalyzeBugHandler::new(invoker.clone())),
            identify_module: Arc::new(IdentifyModuleHandler::new(invoker.clone())),
            generate_test_cases: Arc::new(GenerateTestCasesHandler::new(invoker.clone())),
            invoker,
        }
    }
}

/// API error wrapper mapping domain errors to HTTP status codes.
#[derive(Debug)]
pub struct AnalysisApiError(DomainError);

impl From<DomainError> for AnalysisApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField => StatusCode::BAD_REQUEST,
            ErrorCode::NoProvidersConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
        };
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

/// Analyze a bug report.
///
/// POST /api/analysis/analyze
pub async fn analyze_bug(
    State(state): State<AnalysisAppState>,
    Json(request): Json<AnalyzeBugRequest>,
) -> Result<Json<AnalyzeBugResponse>, AnalysisApiError> {
    let cmd = AnalyzeBugCommand {
        description: request.description,
        logs: request.logs,
        user_story_context: request.user_story_context,
    };

    let analysis = state.analyze_bug.handle(cmd).await?;

    Ok(Json(AnalyzeBugResponse {
        success: true,
        analysis,
    }))
}

/// Draft test cases for an analyzed bug.
///
/// POST /api/analysis/generate-tests
pub async fn generate_tests(
    State(state): State<AnalysisAppState>,
    Json(request): Json<GenerateTestsRequest>,
) -> Result<Json<GenerateTestsResponse>, AnalysisApiError> {
    let analysis = request
        .bug_analysis
        .ok_or_else(|| DomainError::validation("bugAnalysis", "Bug analysis is required"))?;

    let test_cases = state.generate_test_cases.handle(&analysis).await;

    Ok(Json(GenerateTestsResponse {
        success: true,
        test_cases,
    }))
}

/// Identify the module a bug most likely belongs to.
///
/// POST /api/analysis/identify-module
pub async fn identify_module(
    State(state): State<AnalysisAppState>,
    Json(request): Json<IdentifyModuleRequest>,
) -> Result<Json<IdentifyModuleResponse>, AnalysisApiError> {
    if request.description.trim().is_empty() {
        return Err(DomainError::validation("description", "Description is required").into());
    }

    let module = state
        .identify_module
        .handle(&request.description, &request.available_components)
        .await;

    Ok(Json(IdentifyModuleResponse {
        success: true,
        module,
    }))
}

/// Liveness check.
///
/// GET /health
pub async fn health(State(state): State<AnalysisAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "BugSense AI API is running".to_string(),
        providers: state.invoker.provider_names(),
    })
}
