//! Sidebar chat: per-session conversation history, the assistant that
//! talks to the chat-completion provider, and canned answers.

pub mod assistant;
pub mod conversation;
pub mod knowledge;
