//! Per-session conversation history with a sliding retention window.
//!
//! A `Conversation` belongs to exactly one wizard session and is dropped
//! with it. Every assistant call resends the retained turns, so the window
//! bounds both request size and latency. Turns are evicted oldest-first in
//! user/assistant pairs: the retained history always starts with a user turn.

use copilot_types::llm::Message;

/// Smallest usable window: one user turn plus its reply.
pub const MIN_HISTORY_TURNS: usize = 2;

/// Ordered user/assistant turns for one session.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<Message>,
    max_turns: usize,
    evicted: usize,
}

impl Conversation {
    /// Create an empty conversation retaining at most `max_turns` messages.
    ///
    /// Values below [`MIN_HISTORY_TURNS`] are raised to it.
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns: max_turns.max(MIN_HISTORY_TURNS),
            evicted: 0,
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Retained turns, oldest first.
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns dropped by the window so far.
    pub fn evicted_turns(&self) -> usize {
        self.evicted
    }

    /// The message list to send for a new user turn: retained history
    /// followed by `user_content`. Does not modify the conversation.
    pub fn outgoing(&self, user_content: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.extend(self.turns.iter().cloned());
        messages.push(Message::user(user_content));
        messages
    }

    /// Commit a completed exchange, then enforce the window.
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(Message::user(user));
        self.turns.push(Message::assistant(assistant));

        if self.turns.len() > self.max_turns {
            // Round up to whole exchanges so the history never starts mid-pair.
            let excess = self.turns.len() - self.max_turns;
            let drop = (excess.div_ceil(2) * 2).min(self.turns.len());
            self.turns.drain(..drop);
            self.evicted += drop;
            tracing::debug!(
                evicted = drop,
                retained = self.turns.len(),
                "conversation window trimmed"
            );
        }
    }

    /// Forget all turns (e.g., "new conversation" in the sidebar).
    ///
    /// The eviction count restarts too: it describes the current
    /// conversation only.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.evicted = 0;
    }

    /// Render the retained turns as `role: content` lines.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Prefix `prompt` with `context` separated by a blank line.
///
/// An absent or empty context leaves the prompt unchanged.
pub fn compose_prompt(prompt: &str, context: Option<&str>) -> String {
    match context {
        Some(context) if !context.is_empty() => format!("{context}\n\n{prompt}"),
        _ => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copilot_types::llm::MessageRole;

    #[test]
    fn test_compose_prompt_with_context() {
        assert_eq!(compose_prompt("p", Some("c")), "c\n\np");
    }

    #[test]
    fn test_compose_prompt_without_context() {
        assert_eq!(compose_prompt("p", None), "p");
        assert_eq!(compose_prompt("p", Some("")), "p");
    }

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new(10);
        assert!(conversation.is_empty());
        assert_eq!(conversation.max_turns(), 10);
        assert_eq!(conversation.transcript(), "");
    }

    #[test]
    fn test_window_floor() {
        assert_eq!(Conversation::new(0).max_turns(), MIN_HISTORY_TURNS);
    }

    #[test]
    fn test_outgoing_appends_user_turn_without_mutating() {
        let mut conversation = Conversation::new(10);
        conversation.record_exchange("hi", "hello");

        let outgoing = conversation.outgoing("next");
        assert_eq!(outgoing.len(), 3);
        assert_eq!(outgoing[2], Message::user("next"));
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn test_window_evicts_oldest_pairs() {
        let mut conversation = Conversation::new(4);
        for i in 0..3 {
            conversation.record_exchange(format!("q{i}"), format!("a{i}"));
        }

        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.evicted_turns(), 2);
        assert_eq!(conversation.turns()[0], Message::user("q1"));
        assert_eq!(conversation.turns()[3], Message::assistant("a2"));
    }

    #[test]
    fn test_odd_window_keeps_pairs_aligned() {
        let mut conversation = Conversation::new(3);
        conversation.record_exchange("q0", "a0");
        conversation.record_exchange("q1", "a1");

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0].role, MessageRole::User);
        assert_eq!(conversation.turns()[0].content, "q1");
    }

    #[test]
    fn test_transcript_format() {
        let mut conversation = Conversation::new(10);
        conversation.record_exchange("What is a rubric?", "A scoring guide.");
        assert_eq!(
            conversation.transcript(),
            "user: What is a rubric?\nassistant: A scoring guide."
        );
    }

    #[test]
    fn test_clear() {
        let mut conversation = Conversation::new(10);
        conversation.record_exchange("q", "a");
        conversation.clear();
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_clear_resets_eviction_count() {
        let mut conversation = Conversation::new(2);
        conversation.record_exchange("q0", "a0");
        conversation.record_exchange("q1", "a1");
        assert_eq!(conversation.evicted_turns(), 2);

        conversation.clear();
        assert_eq!(conversation.evicted_turns(), 0);

        conversation.record_exchange("q2", "a2");
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.evicted_turns(), 0);
    }
}
