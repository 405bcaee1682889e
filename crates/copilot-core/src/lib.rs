//! Business logic and port definitions for Challenge Copilot.
//!
//! This crate defines the ports (`LlmProvider`, `FeedbackSink`) that the
//! infrastructure layer implements. It depends only on `copilot-types` --
//! never on `copilot-infra` or any network/file IO crate.

pub mod chat;
pub mod feedback;
pub mod llm;
pub mod wizard;
