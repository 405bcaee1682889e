use thiserror::Error;
use uuid::Uuid;

use crate::challenge::SectionKey;
use crate::llm::LlmError;

/// Errors from the conversation assistant.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Missing credential, or a credential the remote endpoint rejected.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The chat-completion endpoint failed: unreachable, non-success status,
    /// or a malformed payload.
    #[error("remote service error: {0}")]
    RemoteService(#[from] LlmError),

    #[error("invalid prompt: {0}")]
    InvalidPrompt(String),
}

/// Errors related to wizard sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),
}

/// Errors from writing a draft section.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("unknown section: '{0}'")]
    UnknownSection(String),

    #[error("invalid {section} section: {message}")]
    InvalidSection { section: SectionKey, message: String },

    #[error("{0}")]
    MissingInput(String),
}

/// Errors from the feedback log.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feedback serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::Configuration("GROQ_API_KEY is not set".to_string());
        assert_eq!(err.to_string(), "configuration error: GROQ_API_KEY is not set");
    }

    #[test]
    fn test_remote_service_wraps_llm_error() {
        let err: AssistantError = LlmError::RateLimited.into();
        assert!(matches!(err, AssistantError::RemoteService(_)));
        assert_eq!(err.to_string(), "remote service error: rate limited");
    }

    #[test]
    fn test_draft_error_display() {
        let err = DraftError::InvalidSection {
            section: SectionKey::Prizes,
            message: "missing field `model`".to_string(),
        };
        assert_eq!(err.to_string(), "invalid prizes section: missing field `model`");
    }
}
