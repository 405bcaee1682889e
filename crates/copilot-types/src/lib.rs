//! Shared domain types for Challenge Copilot.
//!
//! This crate contains the core domain types used across the workspace:
//! the challenge draft and its sections, LLM message shapes, feedback
//! entries, validation warnings, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod challenge;
pub mod config;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod validation;
