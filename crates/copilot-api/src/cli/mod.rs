//! CLI command definitions and dispatch for the `copilot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod config;
pub mod draft;
pub mod feedback;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Build innovation challenges with an AI copilot.
#[derive(Parser)]
#[command(name = "copilot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.copilot/config.toml).
    #[arg(long, global = true, env = "COPILOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Chat with the copilot assistant interactively.
    Chat,

    /// Ask the assistant a single question.
    Ask {
        /// The question to ask.
        prompt: String,

        /// Text prepended to the question as context.
        #[arg(long)]
        context: Option<String>,

        /// Model to use for this question.
        #[arg(long)]
        model: Option<String>,
    },

    /// Leave feedback about the onboarding experience.
    Feedback {
        /// What you liked.
        #[arg(long)]
        positive: Option<String>,

        /// What could be improved.
        #[arg(long)]
        negative: Option<String>,
    },

    /// Work with challenge draft files.
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum DraftCommand {
    /// Validate a draft JSON file and list its warnings.
    Check {
        /// Path to the draft JSON file.
        file: PathBuf,
    },
}

/// Spinner shown while waiting on the assistant.
pub fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
