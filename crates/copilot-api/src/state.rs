//! Application state wiring all services together.
//!
//! AppState holds the concrete instances used by both CLI and REST API:
//! the assistant pinned to the type-erased provider, the session registry,
//! and the feedback log.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use copilot_core::chat::assistant::ConversationAssistant;
use copilot_core::llm::box_provider::BoxLlmProvider;
use copilot_core::wizard::session::SessionRegistry;
use copilot_infra::config::{feedback_log_path, load_config, resolve_data_dir};
use copilot_infra::feedback::JsonlFeedbackLog;
use copilot_infra::llm::create_provider;
use copilot_infra::secret::env::EnvSecretProvider;
use copilot_types::config::CopilotConfig;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CopilotConfig>,
    pub assistant: Arc<ConversationAssistant>,
    pub sessions: Arc<SessionRegistry>,
    pub feedback: Arc<JsonlFeedbackLog>,
}

impl AppState {
    /// Initialize the application state from config and environment.
    ///
    /// Fails fast if the provider credential is not set.
    pub async fn init(config: CopilotConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        let api_key = EnvSecretProvider::new().require(&config.provider.api_key_env)?;
        let provider = create_provider(&config.provider, api_key);

        tracing::info!(
            provider = %config.provider.name,
            model = %config.provider.model,
            data_dir = %data_dir.display(),
            "application state initialized"
        );

        Ok(Self::from_parts(config, &data_dir, provider))
    }

    /// Wire state around an already-constructed provider.
    ///
    /// `data_dir` only anchors the default feedback log path.
    pub fn from_parts(config: CopilotConfig, data_dir: &Path, provider: BoxLlmProvider) -> Self {
        let assistant = ConversationAssistant::new(provider, config.provider.model.clone())
            .with_max_tokens(config.provider.max_tokens)
            .with_temperature(config.provider.temperature);
        let sessions = SessionRegistry::new(config.conversation.max_history_turns)
            .with_idle_timeout(Duration::from_secs(config.sessions.idle_timeout_secs))
            .with_max_sessions(config.sessions.max_sessions);
        let feedback = JsonlFeedbackLog::new(feedback_log_path(&config, data_dir));

        Self {
            config: Arc::new(config),
            assistant: Arc::new(assistant),
            sessions: Arc::new(sessions),
            feedback: Arc::new(feedback),
        }
    }
}

/// Resolve the data directory and load the effective configuration.
pub async fn load_runtime_config(config_path: Option<&Path>) -> anyhow::Result<(CopilotConfig, PathBuf)> {
    let data_dir = resolve_data_dir();
    let config = load_config(config_path, &data_dir).await?;
    Ok((config, data_dir))
}
