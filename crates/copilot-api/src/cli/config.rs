//! `copilot config`: show the effective configuration.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use secrecy::ExposeSecret;

use copilot_infra::config::feedback_log_path;
use copilot_infra::secret::env::EnvSecretProvider;
use copilot_types::config::CopilotConfig;

/// Mask a secret for display, keeping only the last four characters.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

pub fn show_config(config: &CopilotConfig, data_dir: &Path, json: bool) -> Result<()> {
    let key_env = &config.provider.api_key_env;
    let masked_key = EnvSecretProvider::new()
        .get(key_env)
        .map(|secret| mask_secret(secret.expose_secret()));
    let feedback_log = feedback_log_path(config, data_dir);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "data_dir": data_dir,
                "config": config,
                "api_key": masked_key,
                "feedback_log": feedback_log,
            }))?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let key_cell = match &masked_key {
        Some(masked) => Cell::new(format!("{key_env}: {masked}")).fg(Color::Green),
        None => Cell::new(format!("{key_env}: not set")).fg(Color::Red),
    };

    let rows: Vec<(&str, Cell)> = vec![
        ("Provider", Cell::new(&config.provider.name).fg(Color::Cyan)),
        ("Base URL", Cell::new(&config.provider.base_url)),
        ("Model", Cell::new(&config.provider.model).fg(Color::Cyan)),
        ("API key", key_cell),
        ("Max tokens", Cell::new(config.provider.max_tokens)),
        (
            "Temperature",
            Cell::new(
                config
                    .provider
                    .temperature
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "provider default".to_string()),
            ),
        ),
        (
            "History window",
            Cell::new(format!("{} turns", config.conversation.max_history_turns)),
        ),
        (
            "Sessions",
            Cell::new(format!(
                "max {}, idle timeout {}s",
                config.sessions.max_sessions, config.sessions.idle_timeout_secs
            )),
        ),
        ("Feedback log", Cell::new(feedback_log.display()).fg(Color::DarkGrey)),
        (
            "Server",
            Cell::new(format!("{}:{}", config.server.host, config.server.port)),
        ),
        ("OpenTelemetry", Cell::new(config.telemetry.otel)),
        ("Data dir", Cell::new(data_dir.display()).fg(Color::DarkGrey)),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name).fg(Color::White), value]);
    }

    println!();
    println!("  {}", style("Challenge Copilot configuration").bold());
    println!();
    println!("{table}");
    println!();

    Ok(())
}
