//! Interactive CLI chat with the challenge copilot.
//!
//! Implements the terminal counterpart of the wizard sidebar: a readline
//! loop with slash commands, a thinking spinner, and markdown-rendered
//! replies. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
