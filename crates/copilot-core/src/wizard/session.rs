//! Wizard sessions and the in-memory session registry.
//!
//! A session owns one draft and one conversation. The registry hands out
//! `Arc<Mutex<WizardSession>>` so an interaction holds its session's lock
//! for its whole duration while other sessions proceed independently.
//!
//! Sessions live only in memory. The registry drops sessions left idle
//! longer than its idle timeout and caps the number of live sessions,
//! evicting the least recently used one when full.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use copilot_types::challenge::ChallengeDraft;
use copilot_types::error::{AssistantError, SessionError};
use copilot_types::validation::ValidationWarning;

use crate::chat::assistant::ConversationAssistant;
use crate::chat::conversation::Conversation;
use crate::chat::knowledge;
use crate::llm::provider::LlmProvider;

use super::validation::validate_draft;

/// One user's draft plus their sidebar conversation.
#[derive(Debug)]
pub struct WizardSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub launched_at: Option<DateTime<Utc>>,
    pub draft: ChallengeDraft,
    pub conversation: Conversation,
}

/// Result of launching a challenge.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchReport {
    pub session_id: Uuid,
    pub launched_at: DateTime<Utc>,
    pub challenge: ChallengeDraft,
    pub warnings: Vec<ValidationWarning>,
}

impl WizardSession {
    pub fn new(max_history_turns: usize) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            launched_at: None,
            draft: ChallengeDraft::default(),
            conversation: Conversation::new(max_history_turns),
        }
    }

    pub fn warnings(&self) -> Vec<ValidationWarning> {
        validate_draft(&self.draft)
    }

    /// Ask the sidebar assistant.
    ///
    /// A bare question (no context, no model override) matching the
    /// built-in knowledge base is answered locally; the exchange is still
    /// recorded so follow-ups see it. Everything else, including a
    /// knowledge-base question sent with context or an explicit model,
    /// goes to the remote assistant.
    pub async fn ask<P: LlmProvider>(
        &mut self,
        assistant: &ConversationAssistant<P>,
        prompt: &str,
        model: Option<&str>,
        context: Option<&str>,
    ) -> Result<String, AssistantError> {
        let bare = model.is_none_or(str::is_empty) && context.is_none_or(str::is_empty);
        if let Some(answer) = knowledge::lookup(prompt).filter(|_| bare) {
            tracing::debug!(session_id = %self.id, "answered from knowledge base");
            self.conversation.record_exchange(prompt.trim(), answer);
            return Ok(answer.to_string());
        }
        assistant
            .get_response(&mut self.conversation, prompt, model, context)
            .await
    }

    /// Launch the challenge: stamp `launched_at` and snapshot the draft.
    ///
    /// Warnings are reported but never block the launch. Launching again
    /// refreshes the timestamp.
    pub fn launch(&mut self) -> LaunchReport {
        let launched_at = Utc::now();
        self.launched_at = Some(launched_at);
        let warnings = self.warnings();
        tracing::info!(
            session_id = %self.id,
            warnings = warnings.len(),
            "challenge launched"
        );
        LaunchReport {
            session_id: self.id,
            launched_at,
            challenge: self.draft.clone(),
            warnings,
        }
    }
}

pub type SharedSession = Arc<Mutex<WizardSession>>;

/// Sessions idle longer than this are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Live sessions allowed before the least recently used is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

struct RegistryEntry {
    session: SharedSession,
    last_active: Instant,
}

/// Concurrent registry of live wizard sessions.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, RegistryEntry>,
    max_history_turns: usize,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_history_turns: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_history_turns,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Start a new session with an empty draft and conversation.
    ///
    /// Idle sessions are purged first; if the registry is still full the
    /// least recently used session is evicted.
    pub fn create(&self) -> (Uuid, SharedSession) {
        self.purge_expired();
        while self.sessions.len() >= self.max_sessions {
            if !self.evict_least_recent() {
                break;
            }
        }

        let session = WizardSession::new(self.max_history_turns);
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            RegistryEntry {
                session: Arc::clone(&shared),
                last_active: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, live = self.sessions.len(), "wizard session started");
        (id, shared)
    }

    /// Look up a session and mark it active.
    ///
    /// A session idle past the timeout is removed and reported as not found.
    pub fn get(&self, id: Uuid) -> Result<SharedSession, SessionError> {
        let idle_timeout = self.idle_timeout;
        if self
            .sessions
            .remove_if(&id, |_, entry| entry.last_active.elapsed() >= idle_timeout)
            .is_some()
        {
            tracing::info!(session_id = %id, "wizard session expired");
            return Err(SessionError::NotFound(id));
        }

        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?;
        entry.last_active = Instant::now();
        Ok(Arc::clone(&entry.session))
    }

    /// End a session, dropping its draft and conversation.
    pub fn end(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| tracing::info!(session_id = %id, "wizard session ended"))
            .ok_or(SessionError::NotFound(id))
    }

    /// Drop every session idle past the timeout. Returns how many were
    /// removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        let idle_timeout = self.idle_timeout;
        self.sessions
            .retain(|_, entry| entry.last_active.elapsed() < idle_timeout);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::info!(removed, "expired idle wizard sessions");
        }
        removed
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.last_active)
            .map(|entry| *entry.key());
        match oldest {
            Some(id) => {
                self.sessions.remove(&id);
                tracing::warn!(session_id = %id, "session limit reached, evicted least recently used session");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockProvider;
    use crate::wizard::state::ChallengeDraftExt;
    use copilot_types::challenge::{ChallengeType, DefineSection};

    #[test]
    fn test_create_get_end() {
        let registry = SessionRegistry::new(40);
        let (id, _) = registry.create();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(id).is_ok());

        registry.end(id).unwrap();
        assert!(registry.is_empty());
        assert!(matches!(registry.get(id), Err(SessionError::NotFound(_))));
        assert!(registry.end(id).is_err());
    }

    #[tokio::test]
    async fn test_sessions_have_independent_state() {
        let registry = SessionRegistry::new(40);
        let (_, first) = registry.create();
        let (_, second) = registry.create();

        first.lock().await.conversation.record_exchange("q", "a");

        assert_eq!(first.lock().await.conversation.len(), 2);
        assert!(second.lock().await.conversation.is_empty());
    }

    #[tokio::test]
    async fn test_registry_applies_history_window() {
        let registry = SessionRegistry::new(6);
        let (_, session) = registry.create();
        assert_eq!(session.lock().await.conversation.max_turns(), 6);
    }

    #[test]
    fn test_idle_session_expires_on_get() {
        let registry = SessionRegistry::new(40).with_idle_timeout(Duration::ZERO);
        let (id, _) = registry.create();

        assert!(matches!(registry.get(id), Err(SessionError::NotFound(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_purges_idle_sessions() {
        let registry = SessionRegistry::new(40).with_idle_timeout(Duration::ZERO);
        for _ in 0..3 {
            registry.create();
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_active_sessions_are_kept() {
        let registry = SessionRegistry::new(40);
        let ids: Vec<Uuid> = (0..3).map(|_| registry.create().0).collect();

        assert_eq!(registry.purge_expired(), 0);
        assert_eq!(registry.len(), 3);
        for id in ids {
            assert!(registry.get(id).is_ok());
        }
    }

    #[test]
    fn test_full_registry_evicts_least_recently_used() {
        let registry = SessionRegistry::new(40).with_max_sessions(2);
        let pause = || std::thread::sleep(Duration::from_millis(5));

        let (first, _) = registry.create();
        pause();
        let (second, _) = registry.create();
        pause();
        // Touching the first session makes the second the eviction candidate.
        registry.get(first).unwrap();
        pause();
        let (third, _) = registry.create();

        assert_eq!(registry.len(), 2);
        assert!(registry.get(first).is_ok());
        assert!(registry.get(third).is_ok());
        assert!(matches!(registry.get(second), Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_knowledge_base_answer_skips_remote_call() {
        let provider = MockProvider::new();
        let assistant = ConversationAssistant::new(provider.clone(), "m");
        let mut session = WizardSession::new(40);

        let answer = session
            .ask(&assistant, "  what is an innovation challenge? ", None, None)
            .await
            .unwrap();

        assert!(!answer.is_empty());
        assert!(provider.requests().is_empty());
        assert_eq!(session.conversation.len(), 2);
        assert_eq!(
            session.conversation.turns()[0].content,
            "what is an innovation challenge?"
        );
    }

    #[tokio::test]
    async fn test_knowledge_base_question_with_context_goes_to_assistant() {
        let provider = MockProvider::new();
        let assistant = ConversationAssistant::new(provider.clone(), "m");
        let mut session = WizardSession::new(40);

        let reply = session
            .ask(
                &assistant,
                "What is an innovation challenge?",
                None,
                Some("We are a bank"),
            )
            .await
            .unwrap();

        assert_eq!(reply, "reply 1");
        assert_eq!(provider.requests().len(), 1);
        assert_eq!(
            session.conversation.turns()[0].content,
            "We are a bank\n\nWhat is an innovation challenge?"
        );
    }

    #[tokio::test]
    async fn test_knowledge_base_question_with_model_goes_to_assistant() {
        let provider = MockProvider::new();
        let assistant = ConversationAssistant::new(provider.clone(), "m");
        let mut session = WizardSession::new(40);

        session
            .ask(&assistant, "What is an innovation challenge?", Some("mixtral-8x7b-32768"), None)
            .await
            .unwrap();

        assert_eq!(provider.last_request().model, "mixtral-8x7b-32768");
    }

    #[tokio::test]
    async fn test_other_questions_go_to_assistant() {
        let provider = MockProvider::new();
        let assistant = ConversationAssistant::new(provider.clone(), "m");
        let mut session = WizardSession::new(40);

        let reply = session
            .ask(&assistant, "How long should a hackathon run?", None, None)
            .await
            .unwrap();

        assert_eq!(reply, "reply 1");
        assert_eq!(provider.requests().len(), 1);
    }

    #[test]
    fn test_launch_reports_draft_and_warnings() {
        let mut session = WizardSession::new(40);
        session.draft.set_define(DefineSection {
            title: "Smart Grid".to_string(),
            problem: "short".to_string(),
            goals: Vec::new(),
            challenge_type: ChallengeType::Development,
        });

        let report = session.launch();

        assert_eq!(session.launched_at, Some(report.launched_at));
        assert_eq!(report.session_id, session.id);
        assert_eq!(report.challenge, session.draft);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code(), "problem_too_short");
    }
}
