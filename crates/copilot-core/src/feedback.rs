//! Feedback sink port.
//!
//! Implemented in `copilot-infra` by the JSONL feedback log.

use std::future::Future;

use copilot_types::error::FeedbackError;
use copilot_types::feedback::FeedbackEntry;

/// Append-only destination for onboarding feedback.
pub trait FeedbackSink: Send + Sync {
    /// Durably append one entry. Entries are never read back or rewritten.
    fn append(&self, entry: &FeedbackEntry) -> impl Future<Output = Result<(), FeedbackError>> + Send;
}
