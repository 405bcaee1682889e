//! Observability setup for Challenge Copilot.

pub mod tracing_setup;
