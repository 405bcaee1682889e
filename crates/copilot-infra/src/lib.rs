//! Infrastructure layer for Challenge Copilot.
//!
//! Contains implementations of the ports defined in `copilot-core`: the
//! OpenAI-compatible chat-completion provider and the JSONL feedback log,
//! plus configuration loading and credential resolution.

pub mod config;
pub mod feedback;
pub mod llm;
pub mod secret;
