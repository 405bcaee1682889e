//! Sidebar assistant HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/sessions/{id}/chat             - Conversation transcript
//! - POST   /api/v1/sessions/{id}/chat             - Ask the assistant
//! - DELETE /api/v1/sessions/{id}/chat             - Clear the conversation
//! - POST   /api/v1/sessions/{id}/assist/{action}  - Field-specific suggestion
//!
//! The session lock is held across the remote call, so requests within one
//! session are answered in order.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use copilot_core::wizard::prompt::AssistAction;
use copilot_types::llm::Message;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
    /// Overrides the configured model for this call only.
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub history_turns: usize,
}

#[derive(Debug, Serialize)]
pub struct Transcript {
    pub turns: Vec<Message>,
    pub evicted_turns: usize,
}

#[derive(Debug, Serialize)]
pub struct AssistReply {
    pub action: String,
    pub prompt: String,
    pub suggestion: String,
}

/// GET /api/v1/sessions/{id}/chat - Retained conversation turns, oldest first.
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<Transcript>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    let session = session.lock().await;
    let transcript = Transcript {
        turns: session.conversation.turns().to_vec(),
        evicted_turns: session.conversation.evicted_turns(),
    };

    Ok(timer.respond(transcript))
}

/// POST /api/v1/sessions/{id}/chat - Ask the sidebar assistant.
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<ChatRequest>,
) -> Result<ApiResponse<ChatReply>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    let mut session = session.lock().await;
    let reply = session
        .ask(
            state.assistant.as_ref(),
            &body.message,
            body.model.as_deref(),
            body.context.as_deref(),
        )
        .await?;

    Ok(timer.respond(ChatReply {
        reply,
        history_turns: session.conversation.len(),
    }))
}

/// DELETE /api/v1/sessions/{id}/chat - Start a fresh conversation.
pub async fn clear_chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let session = state.sessions.get(sid)?;
    session.lock().await.conversation.clear();

    Ok(timer.respond(serde_json::json!({ "cleared": true })))
}

/// POST /api/v1/sessions/{id}/assist/{action} - Ask for a field suggestion.
///
/// The prompt is built from the current draft; the exchange joins the
/// session conversation like any other.
pub async fn assist(
    State(state): State<AppState>,
    Path((session_id, action)): Path<(String, String)>,
) -> Result<ApiResponse<AssistReply>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;
    let action: AssistAction = action.parse().map_err(AppError::Validation)?;

    let session = state.sessions.get(sid)?;
    let mut session = session.lock().await;
    let prompt = action.build_prompt(&session.draft)?;
    let suggestion = state
        .assistant
        .get_response(&mut session.conversation, &prompt, None, None)
        .await?;

    Ok(timer.respond(AssistReply {
        action: action.to_string(),
        prompt,
        suggestion,
    }))
}
