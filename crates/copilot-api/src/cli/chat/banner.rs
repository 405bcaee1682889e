//! Welcome banner display for chat sessions.

use console::style;

use copilot_core::chat::knowledge::suggested_questions;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the model, a short session id, and the questions the built-in
/// knowledge base answers instantly.
pub fn print_welcome_banner(model: &str, session_id: &str) {
    println!();
    println!(
        "  {} {}",
        style("*").cyan(),
        style("AI Copilot: Innovation Challenge Builder").cyan().bold()
    );
    println!("  {}", style("Ask me anything about building your challenge.").dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!("  {}", style("Try asking:").bold());
    for question in suggested_questions() {
        println!("    {} {}", style("-").dim(), question);
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
