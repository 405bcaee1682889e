//! Feedback HTTP handler.
//!
//! Endpoint:
//! - POST /api/v1/feedback - Append an onboarding feedback entry

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use copilot_core::feedback::FeedbackSink;
use copilot_types::feedback::FeedbackEntry;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// POST /api/v1/feedback - Append one entry to the feedback log.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(entry): Json<FeedbackEntry>,
) -> Result<ApiResponse<FeedbackEntry>, AppError> {
    let timer = RequestTimer::start();

    state.feedback.append(&entry).await?;

    Ok(timer.respond(entry).with_status(StatusCode::CREATED))
}
