//! ChallengeDraft mutation logic.
//!
//! The `ChallengeDraft` struct lives in `copilot-types`; this module provides
//! an extension trait (`ChallengeDraftExt`) with one named setter per wizard
//! section plus a dynamic setter keyed by section name. Every setter replaces
//! the whole section (last write wins) and normalizes it on the way in.

use serde::de::DeserializeOwned;

use copilot_types::challenge::{
    AudienceSection, AudienceType, ChallengeDraft, DefineSection, EvaluationSection,
    MonitorSection, PrizesSection, SectionKey, SubmissionSection, TimelineSection,
};
use copilot_types::error::DraftError;

/// Extension trait for section-by-section draft editing.
pub trait ChallengeDraftExt {
    fn set_define(&mut self, section: DefineSection);

    /// Public-audience fields are cleared for invite-only challenges.
    fn set_audience(&mut self, section: AudienceSection);

    fn set_submission(&mut self, section: SubmissionSection);

    fn set_prizes(&mut self, section: PrizesSection);

    fn set_timeline(&mut self, section: TimelineSection);

    fn set_evaluation(&mut self, section: EvaluationSection);

    fn set_monitor(&mut self, section: MonitorSection);

    /// Replace a section from its JSON record.
    ///
    /// Returns `DraftError::InvalidSection` if `value` does not match the
    /// section's shape; the draft is left untouched in that case.
    fn set_section(&mut self, key: SectionKey, value: serde_json::Value) -> Result<(), DraftError>;

    /// Remove a section entirely, as if it had never been written.
    fn clear_section(&mut self, key: SectionKey);

    /// Sections that have been written, in wizard order.
    fn completed_sections(&self) -> Vec<SectionKey>;
}

impl ChallengeDraftExt for ChallengeDraft {
    fn set_define(&mut self, mut section: DefineSection) {
        section.goals = dedupe(section.goals);
        self.define = Some(section);
    }

    fn set_audience(&mut self, mut section: AudienceSection) {
        if section.audience_type == AudienceType::InviteOnly {
            section.geography = None;
            section.language = None;
        }
        self.audience = Some(section);
    }

    fn set_submission(&mut self, mut section: SubmissionSection) {
        section.formats = dedupe(section.formats);
        section.documents = dedupe(section.documents);
        self.submission = Some(section);
    }

    fn set_prizes(&mut self, section: PrizesSection) {
        self.prizes = Some(section);
    }

    fn set_timeline(&mut self, section: TimelineSection) {
        self.timeline = Some(section);
    }

    fn set_evaluation(&mut self, mut section: EvaluationSection) {
        section.reviewers = dedupe(section.reviewers);
        self.evaluation = Some(section);
    }

    fn set_monitor(&mut self, mut section: MonitorSection) {
        section.alerts = dedupe(section.alerts);
        self.monitor = Some(section);
    }

    fn set_section(&mut self, key: SectionKey, value: serde_json::Value) -> Result<(), DraftError> {
        match key {
            SectionKey::Define => self.set_define(parse_section(key, value)?),
            SectionKey::Audience => self.set_audience(parse_section(key, value)?),
            SectionKey::Submission => self.set_submission(parse_section(key, value)?),
            SectionKey::Prizes => self.set_prizes(parse_section(key, value)?),
            SectionKey::Timeline => self.set_timeline(parse_section(key, value)?),
            SectionKey::Evaluation => self.set_evaluation(parse_section(key, value)?),
            SectionKey::Monitor => self.set_monitor(parse_section(key, value)?),
        }
        tracing::debug!(section = %key, "draft section updated");
        Ok(())
    }

    fn clear_section(&mut self, key: SectionKey) {
        match key {
            SectionKey::Define => self.define = None,
            SectionKey::Audience => self.audience = None,
            SectionKey::Submission => self.submission = None,
            SectionKey::Prizes => self.prizes = None,
            SectionKey::Timeline => self.timeline = None,
            SectionKey::Evaluation => self.evaluation = None,
            SectionKey::Monitor => self.monitor = None,
        }
        tracing::debug!(section = %key, "draft section cleared");
    }

    fn completed_sections(&self) -> Vec<SectionKey> {
        SectionKey::ALL
            .into_iter()
            .filter(|key| match key {
                SectionKey::Define => self.define.is_some(),
                SectionKey::Audience => self.audience.is_some(),
                SectionKey::Submission => self.submission.is_some(),
                SectionKey::Prizes => self.prizes.is_some(),
                SectionKey::Timeline => self.timeline.is_some(),
                SectionKey::Evaluation => self.evaluation.is_some(),
                SectionKey::Monitor => self.monitor.is_some(),
            })
            .collect()
    }
}

fn parse_section<T: DeserializeOwned>(
    key: SectionKey,
    value: serde_json::Value,
) -> Result<T, DraftError> {
    serde_json::from_value(value).map_err(|e| DraftError::InvalidSection {
        section: key,
        message: e.to_string(),
    })
}

/// Multi-selects are sets: keep the first occurrence of each choice.
fn dedupe<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
