//! Test doubles for [`LlmProvider`].

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use copilot_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use super::provider::LlmProvider;

#[derive(Clone)]
pub(crate) enum MockReply {
    Text(String),
    Status(u16),
    Malformed,
    /// The endpoint rejected the API key.
    AuthFailed,
}

/// Provider that replays scripted replies and records every request.
///
/// When the script runs out it echoes `reply N` for the Nth call.
#[derive(Clone, Default)]
pub(crate) struct MockProvider {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_script(replies: Vec<MockReply>) -> Self {
        let provider = Self::default();
        *provider.script.lock().unwrap() = replies.into();
        provider
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> CompletionRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        let call_number = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        let next = self.script.lock().unwrap().pop_front();
        let model = request.model.clone();

        async move {
            let content = match next {
                None => format!("reply {call_number}"),
                Some(MockReply::Text(text)) => text,
                Some(MockReply::Status(status)) => {
                    return Err(LlmError::Status {
                        status,
                        message: "mock failure".to_string(),
                    });
                }
                Some(MockReply::AuthFailed) => return Err(LlmError::AuthenticationFailed),
                Some(MockReply::Malformed) => {
                    return Err(LlmError::Deserialization(
                        "response contained no reply text".to_string(),
                    ));
                }
            };
            Ok(CompletionResponse {
                id: format!("resp-{call_number}"),
                content,
                model,
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            })
        }
    }
}
