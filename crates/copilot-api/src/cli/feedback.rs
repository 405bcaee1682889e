//! `copilot feedback`: record onboarding feedback.

use std::path::Path;

use anyhow::Result;
use console::style;
use dialoguer::Input;

use copilot_core::feedback::FeedbackSink;
use copilot_infra::config::feedback_log_path;
use copilot_infra::feedback::JsonlFeedbackLog;
use copilot_types::config::CopilotConfig;
use copilot_types::feedback::FeedbackEntry;

const POSITIVE_PROMPT: &str = "What did you like about the onboarding experience?";
const NEGATIVE_PROMPT: &str = "What can we improve?";

/// Append one feedback entry, prompting for any answer not given as a flag.
///
/// Prompts are skipped when stdin is not a terminal; missing answers are
/// then recorded as empty strings.
pub async fn submit_feedback(
    config: &CopilotConfig,
    data_dir: &Path,
    positive: Option<String>,
    negative: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let interactive = !json && console::user_attended();

    let positive = match positive {
        Some(text) => text,
        None if interactive => ask(POSITIVE_PROMPT)?,
        None => String::new(),
    };
    let negative = match negative {
        Some(text) => text,
        None if interactive => ask(NEGATIVE_PROMPT)?,
        None => String::new(),
    };

    let entry = FeedbackEntry::new(positive, negative);
    let log = JsonlFeedbackLog::new(feedback_log_path(config, data_dir));
    log.append(&entry).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "feedback": entry,
                "log": log.path(),
            }))?
        );
    } else if !quiet {
        println!();
        println!(
            "  {} {}",
            style("*").green().bold(),
            style("Thank you for your feedback!").bold()
        );
        println!("  {}", style(log.path().display()).dim());
        println!();
    }

    Ok(())
}

fn ask(prompt: &str) -> Result<String> {
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(answer)
}
