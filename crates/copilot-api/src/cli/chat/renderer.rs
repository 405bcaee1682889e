//! Terminal markdown rendering for assistant replies.

use termimad::MadSkin;
use termimad::crossterm::style::Color;

/// Renders markdown replies with `termimad`.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown reply for the terminal.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print the stats footer after a reply.
    ///
    /// Format: "| {time}s . {model}", or "| instant answer" for replies
    /// served from the knowledge base.
    pub fn print_stats_footer(&self, response_ms: Option<u64>, model: &str) {
        let footer = match response_ms {
            Some(ms) => format!(
                "  {} {:.1}s {} {}",
                console::style("|").dim(),
                console::style(ms as f64 / 1000.0).dim(),
                console::style("\u{00b7}").dim(),
                console::style(model).dim(),
            ),
            None => format!(
                "  {} {}",
                console::style("|").dim(),
                console::style("instant answer").dim()
            ),
        };
        println!("{footer}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_text() {
        let renderer = ChatRenderer::new();
        let rendered = renderer.render("Use a **tiered** prize model.");
        assert!(rendered.contains("tiered"));
        assert!(rendered.contains("prize model"));
    }
}
