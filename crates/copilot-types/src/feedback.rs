//! Onboarding feedback captured at the end of the wizard.

use serde::{Deserialize, Serialize};

/// One feedback submission: what went well and what to improve.
///
/// Serialized as a single JSON object per line in the feedback log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(default)]
    pub positive: String,
    #[serde(default)]
    pub negative: String,
}

impl FeedbackEntry {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_wire_shape() {
        let entry = FeedbackEntry::new("x", "y");
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"positive":"x","negative":"y"}"#
        );
    }

    #[test]
    fn test_feedback_missing_fields_default_to_empty() {
        let entry: FeedbackEntry = serde_json::from_str(r#"{"positive":"great"}"#).unwrap();
        assert_eq!(entry.positive, "great");
        assert_eq!(entry.negative, "");
    }
}
