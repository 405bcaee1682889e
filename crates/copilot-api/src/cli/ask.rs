//! One-shot question to the assistant.

use anyhow::Result;
use console::style;

use copilot_core::wizard::session::WizardSession;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;
use super::thinking_spinner;

pub async fn ask(
    state: &AppState,
    prompt: &str,
    context: Option<&str>,
    model: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mut session = WizardSession::new(state.config.conversation.max_history_turns);

    let spinner = (!json && !quiet).then(thinking_spinner);
    let result = session
        .ask(state.assistant.as_ref(), prompt, model, context)
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let reply = result?;

    let model = model
        .filter(|m| !m.is_empty())
        .unwrap_or(state.assistant.default_model());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "reply": reply,
                "model": model,
            }))?
        );
    } else {
        let renderer = ChatRenderer::new();
        println!();
        println!("  {}", style("AI Copilot:").cyan().bold());
        println!("{}", renderer.render(&reply));
    }

    Ok(())
}
