//! Draft validation.
//!
//! Produces non-fatal [`ValidationWarning`]s. Nothing here blocks editing
//! or launch; the wizard shows the warnings next to the offending section.

use copilot_types::challenge::ChallengeDraft;
use copilot_types::validation::{MIN_PROBLEM_STATEMENT_CHARS, ValidationWarning};

/// Check a draft and return every warning that applies, in wizard order.
pub fn validate_draft(draft: &ChallengeDraft) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let (title, problem) = draft
        .define
        .as_ref()
        .map(|d| (d.title.as_str(), d.problem.as_str()))
        .unwrap_or(("", ""));

    if title.trim().is_empty() {
        warnings.push(ValidationWarning::MissingTitle);
    }

    let length = problem.chars().count();
    if length < MIN_PROBLEM_STATEMENT_CHARS {
        warnings.push(ValidationWarning::ProblemTooShort {
            length,
            minimum: MIN_PROBLEM_STATEMENT_CHARS,
        });
    }

    if let Some(timeline) = &draft.timeline {
        if timeline.end < timeline.start {
            warnings.push(ValidationWarning::EndBeforeStart {
                start: timeline.start,
                end: timeline.end,
            });
        }
        if timeline.registration > timeline.end {
            warnings.push(ValidationWarning::RegistrationAfterEnd {
                registration: timeline.registration,
                end: timeline.end,
            });
        }
        if timeline.prototype < timeline.start || timeline.prototype > timeline.end {
            warnings.push(ValidationWarning::PrototypeOutsideWindow {
                prototype: timeline.prototype,
            });
        }
    }

    warnings
}
