//! HTTP plumbing shared by the REST-based adapters.

use reqwest::{Client, Response};
use std::time::Duration;

use crate::ports::AIError;

/// Builds the HTTP client for one provider.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, AIError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Maps a transport-level failure.
pub(crate) fn map_send_error(error: reqwest::Error, timeout: Duration) -> AIError {
    if error.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    } else if error.is_connect() {
        AIError::network(format!("Connection failed: {}", error))
    } else {
        AIError::network(error.to_string())
    }
}

/// Passes successful responses through and maps error statuses.
pub(crate) async fn check_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    Err(error_for_status(status.as_u16(), &error_body))
}

/// Maps an HTTP error status and body to an [`AIError`].
pub(crate) fn error_for_status(status: u16, error_body: &str) -> AIError {
    let message = extract_error_message(error_body);

    match status {
        401 | 403 => AIError::authentication_failed(message),
        402 => AIError::quota_exceeded(message),
        429 => {
            let lowered = error_body.to_lowercase();
            if lowered.contains("quota") || lowered.contains("billing") {
                AIError::quota_exceeded(message)
            } else {
                AIError::rate_limited(message)
            }
        }
        400 => AIError::InvalidRequest(message),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, message)),
        _ => AIError::provider(format!("Unexpected status {}: {}", status, message)),
    }
}

/// Pulls `error.message` out of a JSON error body, or returns the raw body.
///
/// OpenAI, Groq, Anthropic and Gemini all nest the message this way.
fn extract_error_message(error_body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| error_body.trim().to_string())
}
