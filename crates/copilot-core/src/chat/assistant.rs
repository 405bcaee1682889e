//! Conversation assistant: one prompt in, one reply out.
//!
//! The assistant owns no history. Callers pass the session's
//! [`Conversation`] explicitly, so turns never leak between sessions.
//! An exchange is committed only after the remote call succeeds; a failed
//! call leaves the conversation exactly as it was.

use tracing::{Instrument, debug, info_span, warn};

use copilot_types::error::AssistantError;
use copilot_types::llm::{CompletionRequest, LlmError};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::provider::LlmProvider;

use super::conversation::{Conversation, compose_prompt};

/// Default output budget per reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Sends prompts plus session history to a chat-completion provider.
///
/// Generic over the provider so tests can plug in a scripted double;
/// production code uses the type-erased [`BoxLlmProvider`].
pub struct ConversationAssistant<P: LlmProvider = BoxLlmProvider> {
    provider: P,
    default_model: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl<P: LlmProvider> ConversationAssistant<P> {
    pub fn new(provider: P, default_model: impl Into<String>) -> Self {
        Self {
            provider,
            default_model: default_model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Get a reply for `prompt`, continuing `conversation`.
    ///
    /// `context`, when present and non-empty, is prepended to the prompt
    /// separated by a blank line. `model` overrides the default model for
    /// this call only. The returned reply is trimmed.
    ///
    /// # Errors
    ///
    /// - [`AssistantError::InvalidPrompt`] if `prompt` is blank.
    /// - [`AssistantError::Configuration`] if the endpoint rejects the
    ///   credential.
    /// - [`AssistantError::RemoteService`] if the provider fails otherwise or
    ///   returns a malformed response.
    pub async fn get_response(
        &self,
        conversation: &mut Conversation,
        prompt: &str,
        model: Option<&str>,
        context: Option<&str>,
    ) -> Result<String, AssistantError> {
        if prompt.trim().is_empty() {
            return Err(AssistantError::InvalidPrompt(
                "prompt must not be empty".to_string(),
            ));
        }

        let user_content = compose_prompt(prompt, context);
        let model = model
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str())
            .to_string();

        let request = CompletionRequest {
            model,
            messages: conversation.outgoing(&user_content),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            history_turns = conversation.len(),
        );

        let response = match self.provider.complete(&request).instrument(span).await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    provider = self.provider.name(),
                    model = %request.model,
                    error = %err,
                    "chat completion failed"
                );
                return Err(match err {
                    LlmError::AuthenticationFailed => AssistantError::Configuration(format!(
                        "{} rejected the API key; check the configured credential",
                        self.provider.name()
                    )),
                    other => AssistantError::RemoteService(other),
                });
            }
        };

        let reply = response.content.trim().to_string();
        debug!(
            response_id = %response.id,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "chat completion received"
        );

        conversation.record_exchange(user_content, reply.clone());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{MockProvider, MockReply};
    use copilot_types::llm::{Message, MessageRole};

    fn assistant(provider: MockProvider) -> ConversationAssistant<MockProvider> {
        ConversationAssistant::new(provider, "llama3-8b-8192")
    }

    #[tokio::test]
    async fn test_history_grows_two_turns_per_prompt() {
        let provider = MockProvider::new();
        let assistant = assistant(provider.clone());
        let mut conversation = Conversation::new(40);

        for i in 0..5 {
            assistant
                .get_response(&mut conversation, &format!("prompt {i}"), None, None)
                .await
                .unwrap();
        }

        assert_eq!(conversation.len(), 10);
        // The fifth request carried the four prior exchanges plus the new prompt.
        assert_eq!(provider.last_request().messages.len(), 9);
    }

    #[tokio::test]
    async fn test_context_prefixes_outgoing_user_turn() {
        let provider = MockProvider::new();
        let assistant = assistant(provider.clone());
        let mut conversation = Conversation::new(40);

        assistant
            .get_response(&mut conversation, "p", None, Some("c"))
            .await
            .unwrap();

        let request = provider.last_request();
        let last = request.messages.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "c\n\np");
        assert_eq!(conversation.turns()[0].content, "c\n\np");
    }

    #[tokio::test]
    async fn test_no_context_sends_prompt_unchanged() {
        let provider = MockProvider::new();
        let assistant = assistant(provider.clone());
        let mut conversation = Conversation::new(40);

        assistant
            .get_response(&mut conversation, "  spaced prompt ", None, None)
            .await
            .unwrap();

        assert_eq!(
            provider.last_request().messages,
            vec![Message::user("  spaced prompt ")]
        );
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let provider =
            MockProvider::with_script(vec![MockReply::Text("\n  Try a tiered model.  \n".into())]);
        let assistant = assistant(provider);
        let mut conversation = Conversation::new(40);

        let reply = assistant
            .get_response(&mut conversation, "prizes?", None, None)
            .await
            .unwrap();

        assert_eq!(reply, "Try a tiered model.");
        assert_eq!(conversation.turns()[1], Message::assistant("Try a tiered model."));
    }

    #[tokio::test]
    async fn test_error_status_leaves_history_unchanged() {
        let provider = MockProvider::with_script(vec![
            MockReply::Text("first".into()),
            MockReply::Status(500),
        ]);
        let assistant = assistant(provider.clone());
        let mut conversation = Conversation::new(40);

        assistant
            .get_response(&mut conversation, "one", None, None)
            .await
            .unwrap();
        let before = conversation.turns().to_vec();

        let err = assistant
            .get_response(&mut conversation, "two", None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AssistantError::RemoteService(LlmError::Status { status: 500, .. })
        ));
        assert_eq!(conversation.turns(), before.as_slice());
        // The failed request still carried the new prompt.
        assert_eq!(provider.last_request().messages.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_response_is_remote_error() {
        let provider = MockProvider::with_script(vec![MockReply::Malformed]);
        let assistant = assistant(provider);
        let mut conversation = Conversation::new(40);

        let err = assistant
            .get_response(&mut conversation, "hello", None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AssistantError::RemoteService(LlmError::Deserialization(_))
        ));
        assert!(conversation.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_credential_is_configuration_error() {
        let provider = MockProvider::with_script(vec![
            MockReply::Text("first".into()),
            MockReply::AuthFailed,
        ]);
        let assistant = assistant(provider);
        let mut conversation = Conversation::new(40);

        assistant
            .get_response(&mut conversation, "one", None, None)
            .await
            .unwrap();
        let before = conversation.turns().to_vec();

        let err = assistant
            .get_response(&mut conversation, "two", None, None)
            .await
            .unwrap_err();

        match err {
            AssistantError::Configuration(message) => assert!(message.contains("mock")),
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert_eq!(conversation.turns(), before.as_slice());
    }

    #[tokio::test]
    async fn test_blank_prompt_rejected_without_remote_call() {
        let provider = MockProvider::new();
        let assistant = assistant(provider.clone());
        let mut conversation = Conversation::new(40);

        let err = assistant
            .get_response(&mut conversation, "   ", None, Some("context"))
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::InvalidPrompt(_)));
        assert!(provider.requests().is_empty());
        assert!(conversation.is_empty());
    }

    #[tokio::test]
    async fn test_model_override_and_default() {
        let provider = MockProvider::new();
        let assistant = assistant(provider.clone()).with_max_tokens(256);
        let mut conversation = Conversation::new(40);

        assistant
            .get_response(&mut conversation, "a", None, None)
            .await
            .unwrap();
        assert_eq!(provider.last_request().model, "llama3-8b-8192");
        assert_eq!(provider.last_request().max_tokens, 256);

        assistant
            .get_response(&mut conversation, "b", Some("mixtral-8x7b-32768"), None)
            .await
            .unwrap();
        assert_eq!(provider.last_request().model, "mixtral-8x7b-32768");
    }

    #[tokio::test]
    async fn test_separate_conversations_do_not_share_turns() {
        let provider = MockProvider::new();
        let assistant = assistant(provider.clone());
        let mut alice = Conversation::new(40);
        let mut bob = Conversation::new(40);

        assistant.get_response(&mut alice, "alice 1", None, None).await.unwrap();
        assistant.get_response(&mut alice, "alice 2", None, None).await.unwrap();
        assistant.get_response(&mut bob, "bob 1", None, None).await.unwrap();

        assert_eq!(alice.len(), 4);
        assert_eq!(bob.len(), 2);
        assert_eq!(provider.last_request().messages, vec![Message::user("bob 1")]);
    }

    #[tokio::test]
    async fn test_boxed_provider_dispatch() {
        let assistant = ConversationAssistant::new(BoxLlmProvider::new(MockProvider::new()), "m");
        let mut conversation = Conversation::new(40);

        let reply = assistant
            .get_response(&mut conversation, "hi", None, None)
            .await
            .unwrap();

        assert_eq!(assistant.provider_name(), "mock");
        assert_eq!(reply, "reply 1");
    }
}
