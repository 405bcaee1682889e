//! Main chat loop orchestration.
//!
//! Runs one local wizard session: banner, input loop, slash commands, and
//! assistant calls through the same path the REST sidebar uses, so
//! knowledge-base answers and the history window behave identically.

use std::time::Instant;

use console::style;
use tracing::{info, warn};

use copilot_core::chat::knowledge;
use copilot_core::wizard::session::WizardSession;
use copilot_types::llm::MessageRole;

use crate::cli::thinking_spinner;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Longest history line shown by `/history` before truncation.
const HISTORY_PREVIEW_CHARS: usize = 100;

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut session = WizardSession::new(state.config.conversation.max_history_turns);
    let model = state.assistant.default_model().to_string();
    info!(session_id = %session.id, model = %model, "chat session started");

    print_welcome_banner(&model, &session.id.to_string());

    let renderer = ChatRenderer::new();
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if text.is_empty() {
            println!(
                "  {}",
                style("Enter a question to ask the AI copilot.").dim()
            );
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::New => {
                    session.conversation.clear();
                    println!("\n  {} Conversation cleared.\n", style("*").cyan().bold());
                }
                ChatCommand::History => print_history(&session),
                ChatCommand::Unknown(cmd_name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(cmd_name).dim()
                    );
                }
            }
            continue;
        }

        let from_knowledge_base = knowledge::lookup(&text).is_some();
        let spinner = thinking_spinner();
        let started = Instant::now();
        let result = session.ask(state.assistant.as_ref(), &text, None, None).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                println!();
                println!("  {}", style("AI Copilot:").cyan().bold());
                println!("{}", renderer.render(&reply));
                let elapsed = (!from_knowledge_base).then(|| started.elapsed().as_millis() as u64);
                renderer.print_stats_footer(elapsed, &model);
                println!();
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "assistant call failed");
                eprintln!("\n  {} {e}\n", style("!").red().bold());
            }
        }
    }

    chat_input.finish();
    info!(
        session_id = %session.id,
        turns = session.conversation.len(),
        "chat session ended"
    );
    Ok(())
}

fn print_history(session: &WizardSession) {
    println!();
    if session.conversation.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for turn in session.conversation.turns() {
        let label = match turn.role {
            MessageRole::User => style("You").green(),
            MessageRole::Assistant => style("AI Copilot").cyan(),
        };
        println!("  {} {}", label.bold(), preview(&turn.content));
    }
    let evicted = session.conversation.evicted_turns();
    if evicted > 0 {
        println!(
            "  {}",
            style(format!("({evicted} older turns dropped from the window)")).dim()
        );
    }
    println!();
}

fn preview(content: &str) -> String {
    let single_line = content.replace('\n', " ");
    if single_line.chars().count() > HISTORY_PREVIEW_CHARS {
        let head: String = single_line.chars().take(HISTORY_PREVIEW_CHARS - 3).collect();
        format!("{head}...")
    } else {
        single_line
    }
}
