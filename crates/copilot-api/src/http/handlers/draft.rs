//! Challenge draft HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/sessions/{id}/draft            - Draft JSON
//! - PUT /api/v1/sessions/{id}/draft/{section}  - Replace one section
//! - DELETE /api/v1/sessions/{id}/draft/{section} - Clear one section
//! - GET /api/v1/sessions/{id}/draft/warnings   - Validation warnings

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use copilot_core::wizard::state::ChallengeDraftExt;
use copilot_types::challenge::{ChallengeDraft, SectionKey};
use copilot_types::error::DraftError;

use crate::http::error::AppError;
use crate::http::handlers::{WarningView, parse_uuid, warning_views};
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Draft after a section write or clear.
#[derive(Debug, Serialize)]
pub struct DraftUpdate {
    pub section: SectionKey,
    pub draft: ChallengeDraft,
    pub completed_sections: Vec<SectionKey>,
    pub warnings: Vec<WarningView>,
}

/// GET /api/v1/sessions/{id}/draft - The draft as JSON. Unset sections are absent.
pub async fn get_draft(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<ChallengeDraft>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    let draft = session.lock().await.draft.clone();

    Ok(timer
        .respond(draft)
        .with_link("self", &format!("/api/v1/sessions/{sid}/draft")))
}

/// PUT /api/v1/sessions/{id}/draft/{section} - Replace one section.
pub async fn put_section(
    State(state): State<AppState>,
    Path((session_id, section)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> Result<ApiResponse<DraftUpdate>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;
    let key: SectionKey = section
        .parse()
        .map_err(|_| DraftError::UnknownSection(section.clone()))?;

    let session = state.sessions.get(sid)?;
    let mut session = session.lock().await;
    session.draft.set_section(key, body)?;

    tracing::debug!(session_id = %sid, section = %key, "draft section updated");

    let update = DraftUpdate {
        section: key,
        draft: session.draft.clone(),
        completed_sections: session.draft.completed_sections(),
        warnings: warning_views(&session.warnings()),
    };

    Ok(timer.respond(update))
}

/// DELETE /api/v1/sessions/{id}/draft/{section} - Clear one section.
///
/// Clearing a section that was never written is not an error.
pub async fn delete_section(
    State(state): State<AppState>,
    Path((session_id, section)): Path<(String, String)>,
) -> Result<ApiResponse<DraftUpdate>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;
    let key: SectionKey = section
        .parse()
        .map_err(|_| DraftError::UnknownSection(section.clone()))?;

    let session = state.sessions.get(sid)?;
    let mut session = session.lock().await;
    session.draft.clear_section(key);

    let update = DraftUpdate {
        section: key,
        draft: session.draft.clone(),
        completed_sections: session.draft.completed_sections(),
        warnings: warning_views(&session.warnings()),
    };

    Ok(timer.respond(update))
}

/// GET /api/v1/sessions/{id}/draft/warnings - Current validation warnings.
pub async fn get_warnings(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<Vec<WarningView>>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    let warnings = session.lock().await.warnings();

    Ok(timer.respond(warning_views(&warnings)))
}
