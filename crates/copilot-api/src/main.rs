//! Challenge Copilot CLI and REST API entry point.
//!
//! Binary name: `copilot`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::generate;
use tracing::instrument::WithSubscriber;

use copilot_observe::tracing_setup::{bootstrap_subscriber, init_tracing, shutdown_tracing};
use copilot_types::config::CopilotConfig;

use cli::{Cli, Commands, DraftCommand};
use state::{AppState, load_runtime_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,copilot=debug",
        _ => "trace",
    };

    // Shell completions don't need config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "copilot", &mut std::io::stdout());
        return Ok(());
    }

    let (config, data_dir) = load_runtime_config(cli.config.as_deref())
        .with_subscriber(bootstrap_subscriber(filter))
        .await?;

    init_tracing(filter, config.telemetry.otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli, config, data_dir).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, config: CopilotConfig, data_dir: PathBuf) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::init(config, data_dir).await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Challenge Copilot API listening on {}",
                console::style("*").cyan().bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Chat => {
            let state = AppState::init(config, data_dir).await?;
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::Ask {
            prompt,
            context,
            model,
        } => {
            let state = AppState::init(config, data_dir).await?;
            cli::ask::ask(
                &state,
                &prompt,
                context.as_deref(),
                model.as_deref(),
                cli.json,
                cli.quiet,
            )
            .await?;
        }

        Commands::Feedback { positive, negative } => {
            cli::feedback::submit_feedback(
                &config, &data_dir, positive, negative, cli.json, cli.quiet,
            )
            .await?;
        }

        Commands::Draft { command } => match command {
            DraftCommand::Check { file } => {
                cli::draft::check_draft(&file, cli.json).await?;
            }
        },

        Commands::Config => {
            cli::config::show_config(&config, &data_dir, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
