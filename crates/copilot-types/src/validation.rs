//! Non-fatal draft validation warnings.
//!
//! Warnings are surfaced to the user but never block editing or submit.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Minimum length (in characters) for a useful problem statement.
pub const MIN_PROBLEM_STATEMENT_CHARS: usize = 50;

/// A problem spotted in the draft that the user should look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// The challenge has no title.
    MissingTitle,
    /// The problem statement is shorter than the minimum.
    ProblemTooShort { length: usize, minimum: usize },
    /// The challenge ends before it starts.
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    /// Registration closes after the challenge has ended.
    RegistrationAfterEnd { registration: NaiveDate, end: NaiveDate },
    /// The prototype review is not inside the challenge window.
    PrototypeOutsideWindow { prototype: NaiveDate },
}

impl ValidationWarning {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationWarning::MissingTitle => "missing_title",
            ValidationWarning::ProblemTooShort { .. } => "problem_too_short",
            ValidationWarning::EndBeforeStart { .. } => "end_before_start",
            ValidationWarning::RegistrationAfterEnd { .. } => "registration_after_end",
            ValidationWarning::PrototypeOutsideWindow { .. } => "prototype_outside_window",
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::MissingTitle => write!(f, "Challenge title is required."),
            ValidationWarning::ProblemTooShort { minimum, .. } => write!(
                f,
                "Problem statement should be at least {minimum} characters long."
            ),
            ValidationWarning::EndBeforeStart { start, end } => {
                write!(f, "Challenge end date {end} is before its start date {start}.")
            }
            ValidationWarning::RegistrationAfterEnd { registration, end } => write!(
                f,
                "Registration deadline {registration} is after the challenge ends on {end}."
            ),
            ValidationWarning::PrototypeOutsideWindow { prototype } => write!(
                f,
                "Prototype review date {prototype} falls outside the challenge window."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            ValidationWarning::MissingTitle.to_string(),
            "Challenge title is required."
        );
        let short = ValidationWarning::ProblemTooShort {
            length: 12,
            minimum: MIN_PROBLEM_STATEMENT_CHARS,
        };
        assert_eq!(
            short.to_string(),
            "Problem statement should be at least 50 characters long."
        );
    }

    #[test]
    fn test_warning_serializes_with_code_tag() {
        let json = serde_json::to_value(ValidationWarning::ProblemTooShort {
            length: 3,
            minimum: 50,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "problem_too_short", "length": 3, "minimum": 50})
        );
        assert_eq!(json["code"], ValidationWarning::ProblemTooShort { length: 3, minimum: 50 }.code());
    }
}
