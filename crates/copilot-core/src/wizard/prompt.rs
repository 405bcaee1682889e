//! Prompt templates for the per-field "ask AI" actions.

use std::fmt;
use std::str::FromStr;

use copilot_types::challenge::{ChallengeDraft, PrizeModel};
use copilot_types::error::DraftError;

/// Improve a problem statement.
pub fn improve_problem_statement(problem: &str) -> String {
    format!("Improve and clarify this problem statement for an innovation challenge: {problem}")
}

/// Suggest how to split a prize budget.
pub fn suggest_prize_breakdown(model: PrizeModel, budget: u64) -> String {
    format!("Suggest a prize distribution model for a {model} format with a ${budget} budget.")
}

/// Turn free-form scoring notes into a rubric.
pub fn generate_rubric(criteria: &str) -> String {
    format!("Generate a review rubric for: {criteria}")
}

/// Field-specific assistant actions offered by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistAction {
    /// "Suggest Better Problem Statement" on the define step.
    ProblemStatement,
    /// "AI Suggest Prize Breakdown" on the prizes step.
    PrizeBreakdown,
    /// "AI Generate Rubric" on the evaluation step.
    Rubric,
}

impl AssistAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistAction::ProblemStatement => "problem-statement",
            AssistAction::PrizeBreakdown => "prize-breakdown",
            AssistAction::Rubric => "rubric",
        }
    }

    /// Build the prompt for this action from the current draft.
    ///
    /// Uses the wizard's defaults for an unset prizes section
    /// (single winner, no budget). Improving a problem statement requires
    /// one to exist.
    pub fn build_prompt(&self, draft: &ChallengeDraft) -> Result<String, DraftError> {
        match self {
            AssistAction::ProblemStatement => {
                let problem = draft
                    .define
                    .as_ref()
                    .map(|d| d.problem.trim())
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        DraftError::MissingInput(
                            "Please enter a problem statement first.".to_string(),
                        )
                    })?;
                Ok(improve_problem_statement(problem))
            }
            AssistAction::PrizeBreakdown => {
                let (model, budget) = draft
                    .prizes
                    .as_ref()
                    .map(|p| (p.model, p.budget))
                    .unwrap_or((PrizeModel::SingleWinner, 0));
                Ok(suggest_prize_breakdown(model, budget))
            }
            AssistAction::Rubric => {
                let criteria = draft
                    .evaluation
                    .as_ref()
                    .map(|e| e.criteria.as_str())
                    .unwrap_or_default();
                Ok(generate_rubric(criteria))
            }
        }
    }
}

impl fmt::Display for AssistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "problem-statement" => Ok(AssistAction::ProblemStatement),
            "prize-breakdown" => Ok(AssistAction::PrizeBreakdown),
            "rubric" => Ok(AssistAction::Rubric),
            other => Err(format!("unknown assist action: '{other}'")),
        }
    }
}
