//! Wizard session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions              - Start a wizard session
//! - GET    /api/v1/sessions/{id}         - Session summary
//! - DELETE /api/v1/sessions/{id}         - End a session
//! - POST   /api/v1/sessions/{id}/submit  - Launch the challenge
//! - POST   /api/v1/sessions/{id}/support - Request support

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use copilot_core::wizard::session::WizardSession;
use copilot_core::wizard::state::ChallengeDraftExt;
use copilot_core::wizard::support::{SupportTicket, request_support};
use copilot_types::challenge::{ChallengeDraft, SectionKey};

use crate::http::error::AppError;
use crate::http::handlers::{WarningView, parse_uuid, warning_views};
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Session overview returned by create/get.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launched_at: Option<DateTime<Utc>>,
    pub draft: ChallengeDraft,
    pub completed_sections: Vec<SectionKey>,
    pub warnings: Vec<WarningView>,
    pub history_turns: usize,
}

impl SessionSummary {
    fn from_session(session: &WizardSession) -> Self {
        Self {
            id: session.id,
            started_at: session.started_at,
            launched_at: session.launched_at,
            draft: session.draft.clone(),
            completed_sections: session.draft.completed_sections(),
            warnings: warning_views(&session.warnings()),
            history_turns: session.conversation.len(),
        }
    }
}

/// Result of launching a challenge.
#[derive(Debug, Serialize)]
pub struct LaunchView {
    pub session_id: Uuid,
    pub launched_at: DateTime<Utc>,
    pub challenge: ChallengeDraft,
    pub warnings: Vec<WarningView>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SupportRequest {
    /// Section the request was raised from; absent for a general request.
    #[serde(default)]
    pub topic: Option<SectionKey>,
}

/// POST /api/v1/sessions - Start a new wizard session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionSummary>, AppError> {
    let timer = RequestTimer::start();
    let (id, session) = state.sessions.create();
    let summary = SessionSummary::from_session(&*session.lock().await);

    Ok(timer
        .respond(summary)
        .with_status(StatusCode::CREATED)
        .with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("draft", &format!("/api/v1/sessions/{id}/draft"))
        .with_link("chat", &format!("/api/v1/sessions/{id}/chat")))
}

/// GET /api/v1/sessions/{id} - Session summary.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<SessionSummary>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    let summary = SessionSummary::from_session(&*session.lock().await);

    Ok(timer
        .respond(summary)
        .with_link("self", &format!("/api/v1/sessions/{sid}")))
}

/// DELETE /api/v1/sessions/{id} - End a session and drop its state.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    state.sessions.end(sid)?;

    Ok(timer.respond(serde_json::json!({ "ended": true, "id": sid })))
}

/// POST /api/v1/sessions/{id}/submit - Launch the challenge.
///
/// Validation warnings are returned alongside the draft and never block.
pub async fn submit_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<LaunchView>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    let report = session.lock().await.launch();

    Ok(timer.respond(LaunchView {
        session_id: report.session_id,
        launched_at: report.launched_at,
        challenge: report.challenge,
        warnings: warning_views(&report.warnings),
    }))
}

/// POST /api/v1/sessions/{id}/support - Ask for a platform representative.
pub async fn request_session_support(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SupportRequest>,
) -> Result<ApiResponse<SupportTicket>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    // Only live sessions can raise requests.
    state.sessions.get(sid)?;
    let ticket = request_support(sid, body.topic);

    Ok(timer.respond(ticket))
}
