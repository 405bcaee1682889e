//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use copilot_types::error::{AssistantError, DraftError, FeedbackError, SessionError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Unknown wizard session.
    Session(SessionError),
    /// Assistant call failed or was rejected.
    Assistant(AssistantError),
    /// Draft section could not be written.
    Draft(DraftError),
    /// Feedback log write failed.
    Feedback(FeedbackError),
    /// Malformed request input.
    Validation(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<AssistantError> for AppError {
    fn from(e: AssistantError) -> Self {
        AppError::Assistant(e)
    }
}

impl From<DraftError> for AppError {
    fn from(e: DraftError) -> Self {
        AppError::Draft(e)
    }
}

impl From<FeedbackError> for AppError {
    fn from(e: FeedbackError) -> Self {
        AppError::Feedback(e)
    }
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Session(SessionError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
            }
            AppError::Assistant(AssistantError::Configuration(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AppError::Assistant(AssistantError::RemoteService(_)) => {
                (StatusCode::BAD_GATEWAY, "REMOTE_SERVICE_ERROR")
            }
            AppError::Assistant(AssistantError::InvalidPrompt(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_PROMPT")
            }
            AppError::Draft(_) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Feedback(_) => (StatusCode::INTERNAL_SERVER_ERROR, "FEEDBACK_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Session(e) => e.to_string(),
            AppError::Assistant(e) => e.to_string(),
            AppError::Draft(e) => e.to_string(),
            AppError::Feedback(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
