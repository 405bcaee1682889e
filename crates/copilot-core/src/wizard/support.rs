//! "Need help?" support requests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use copilot_types::challenge::SectionKey;

/// Fixed acknowledgement shown for every support request.
pub const SUPPORT_ACKNOWLEDGEMENT: &str = "A platform representative will contact you shortly.";

#[derive(Debug, Clone, Serialize)]
pub struct SupportTicket {
    pub session_id: Uuid,
    /// Wizard section the user asked from; `None` for a general request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<SectionKey>,
    pub requested_at: DateTime<Utc>,
    pub message: &'static str,
}

/// Record a support request and return the acknowledgement.
pub fn request_support(session_id: Uuid, topic: Option<SectionKey>) -> SupportTicket {
    let topic_name = topic.map(|t| t.as_str()).unwrap_or("general");
    tracing::info!(session_id = %session_id, topic = topic_name, "support requested");
    SupportTicket {
        session_id,
        topic,
        requested_at: Utc::now(),
        message: SUPPORT_ACKNOWLEDGEMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgement() {
        let id = Uuid::now_v7();
        let ticket = request_support(id, Some(SectionKey::Prizes));
        assert_eq!(ticket.session_id, id);
        assert_eq!(ticket.message, "A platform representative will contact you shortly.");

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["topic"], "prizes");
    }

    #[test]
    fn test_general_request_omits_topic() {
        let ticket = request_support(Uuid::now_v7(), None);
        let json = serde_json::to_value(&ticket).unwrap();
        assert!(json.get("topic").is_none());
    }
}
