//! LlmProvider trait definition.
//!
//! This is the core abstraction that chat-completion backends implement.
//! Uses RPITIT for `complete`, consistent with all async traits in this
//! project.

use copilot_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends (Groq, OpenAI, test doubles).
///
/// Implementations live in copilot-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// A response without reply text must be reported as
    /// `LlmError::Deserialization`, never as an empty reply.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
