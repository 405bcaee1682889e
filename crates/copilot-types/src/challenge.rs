//! Innovation challenge draft types.
//!
//! A `ChallengeDraft` is assembled section by section across the wizard.
//! Every section is optional: a section that was never written is absent
//! from the serialized draft rather than filled with defaults.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declares a closed set of wizard choices.
///
/// Each variant serializes to (and displays as) the label shown in the
/// wizard, e.g. `ChallengeType::DataScience` <-> `"Data Science"`.
macro_rules! choice_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every choice, in wizard display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label shown in the wizard.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_set! {
    /// What the challenge is meant to achieve.
    pub enum ChallengeGoal {
        Business => "Business",
        Technical => "Technical",
        Social => "Social",
    }
}

choice_set! {
    pub enum ChallengeType {
        Ideation => "Ideation",
        Development => "Development",
        DataScience => "Data Science",
        Ai => "AI",
    }
}

choice_set! {
    /// Who can join the challenge.
    pub enum AudienceType {
        OpenToPublic => "Open to Public",
        InviteOnly => "Invite Only",
    }
}

choice_set! {
    pub enum Language {
        English => "English",
        Spanish => "Spanish",
        French => "French",
    }
}

choice_set! {
    pub enum SubmissionFormat {
        Zip => "ZIP",
        GitHubRepo => "GitHub Repo",
        GoogleDriveLink => "Google Drive Link",
    }
}

choice_set! {
    pub enum RequiredDocument {
        Readme => "README",
        DemoVideo => "Demo Video",
        ArchitectureDiagram => "Architecture Diagram",
    }
}

choice_set! {
    /// How the prize pool is distributed.
    pub enum PrizeModel {
        SingleWinner => "Single Winner",
        Tiered => "Tiered",
        MilestoneBased => "Milestone-based",
    }
}

choice_set! {
    /// When submissions are reviewed.
    pub enum EvaluationModel {
        Rolling => "Rolling",
        PostSubmission => "Post-Submission",
    }
}

choice_set! {
    pub enum ReviewerKind {
        Internal => "Internal",
        External => "External",
        AiAssisted => "AI-assisted",
    }
}

choice_set! {
    /// Notification channels for challenge monitoring.
    pub enum AlertChannel {
        Email => "Email",
        InApp => "In-App",
        Slack => "Slack",
    }
}

/// Step 1: what the challenge is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineSection {
    pub title: String,
    pub problem: String,
    #[serde(default)]
    pub goals: Vec<ChallengeGoal>,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
}

/// Step 2: audience and registration.
///
/// `geography` and `language` only apply to public challenges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceSection {
    #[serde(rename = "type")]
    pub audience_type: AudienceType,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub teams: bool,
    #[serde(default)]
    pub forums: bool,
}

/// Step 3: what participants hand in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSection {
    #[serde(default)]
    pub formats: Vec<SubmissionFormat>,
    #[serde(default)]
    pub documents: Vec<RequiredDocument>,
}

/// Step 4: prize configuration. Budget is in whole dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizesSection {
    pub model: PrizeModel,
    #[serde(default)]
    pub budget: u64,
}

/// Step 5: timeline and milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSection {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub registration: NaiveDate,
    pub prototype: NaiveDate,
}

/// Step 6: how submissions are judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSection {
    pub model: EvaluationModel,
    #[serde(default)]
    pub reviewers: Vec<ReviewerKind>,
    #[serde(default)]
    pub criteria: String,
}

/// Step 7: monitoring notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSection {
    #[serde(default)]
    pub alerts: Vec<AlertChannel>,
}

/// The in-progress challenge record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub define: Option<DefineSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<AudienceSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prizes: Option<PrizesSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorSection>,
}

/// Names of the seven wizard sections, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Define,
    Audience,
    Submission,
    Prizes,
    Timeline,
    Evaluation,
    Monitor,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Define,
        SectionKey::Audience,
        SectionKey::Submission,
        SectionKey::Prizes,
        SectionKey::Timeline,
        SectionKey::Evaluation,
        SectionKey::Monitor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Define => "define",
            SectionKey::Audience => "audience",
            SectionKey::Submission => "submission",
            SectionKey::Prizes => "prizes",
            SectionKey::Timeline => "timeline",
            SectionKey::Evaluation => "evaluation",
            SectionKey::Monitor => "monitor",
        }
    }

    /// Tab title as shown in the wizard.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Define => "1. Define Challenge",
            SectionKey::Audience => "2. Set Audience",
            SectionKey::Submission => "3. Submission Requirements",
            SectionKey::Prizes => "4. Configure Prizes",
            SectionKey::Timeline => "5. Timeline & Milestones",
            SectionKey::Evaluation => "6. Evaluation Criteria",
            SectionKey::Monitor => "7. Monitor Challenge",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "define" => Ok(SectionKey::Define),
            "audience" => Ok(SectionKey::Audience),
            "submission" => Ok(SectionKey::Submission),
            "prizes" => Ok(SectionKey::Prizes),
            "timeline" => Ok(SectionKey::Timeline),
            "evaluation" => Ok(SectionKey::Evaluation),
            "monitor" => Ok(SectionKey::Monitor),
            other => Err(format!("unknown section: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_labels_serialize_as_wizard_text() {
        assert_eq!(
            serde_json::to_string(&ChallengeType::DataScience).unwrap(),
            "\"Data Science\""
        );
        assert_eq!(
            serde_json::to_string(&PrizeModel::MilestoneBased).unwrap(),
            "\"Milestone-based\""
        );
        assert_eq!(AudienceType::InviteOnly.to_string(), "Invite Only");
        let parsed: ReviewerKind = serde_json::from_str("\"AI-assisted\"").unwrap();
        assert_eq!(parsed, ReviewerKind::AiAssisted);
    }

    #[test]
    fn test_choice_set_all_in_display_order() {
        let labels: Vec<&str> = ChallengeType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Ideation", "Development", "Data Science", "AI"]);
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let result: Result<AlertChannel, _> = serde_json::from_str("\"Carrier Pigeon\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_draft_serializes_to_empty_object() {
        let draft = ChallengeDraft::default();
        assert_eq!(serde_json::to_value(&draft).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_define_section_wire_shape() {
        let section = DefineSection {
            title: "T".to_string(),
            problem: "P".to_string(),
            goals: vec![ChallengeGoal::Business],
            challenge_type: ChallengeType::Ai,
        };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            serde_json::json!({"title": "T", "problem": "P", "goals": ["Business"], "type": "AI"})
        );
    }

    #[test]
    fn test_timeline_dates_use_iso_format() {
        let json = serde_json::json!({
            "start": "2026-01-10",
            "end": "2026-03-01",
            "registration": "2026-01-31",
            "prototype": "2026-02-15"
        });
        let timeline: TimelineSection = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(timeline.start, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(serde_json::to_value(&timeline).unwrap(), json);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let result: Result<PrizesSection, _> =
            serde_json::from_value(serde_json::json!({"model": "Tiered", "budget": -5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_section_key_roundtrip() {
        for key in SectionKey::ALL {
            let parsed: SectionKey = key.to_string().parse().unwrap();
            assert_eq!(key, parsed);
        }
        assert!("rewards".parse::<SectionKey>().is_err());
    }
}
