//! Configuration types for Challenge Copilot.
//!
//! `CopilotConfig` mirrors `config.toml`. Every field has a default so an
//! empty or missing file yields a working Groq-backed setup; only the API
//! key itself must come from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopilotConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub conversation: ConversationSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub feedback: FeedbackSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// Chat-completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Human-readable provider name (e.g., "groq", "openai").
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default model when a call does not name one.
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

/// Per-session conversation retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSettings {
    /// Maximum number of turns (user + assistant messages) kept and resent.
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,
}

fn default_max_history_turns() -> usize {
    40
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            max_history_turns: default_max_history_turns(),
        }
    }
}

/// Lifetime limits for in-memory wizard sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Sessions untouched for this many seconds are dropped.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Upper bound on live sessions; the least recently used one is
    /// dropped to make room.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_idle_timeout_secs() -> u64 {
    3600
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackSettings {
    /// Feedback log location. Relative paths resolve against the data directory;
    /// unset means `{data_dir}/feedback.jsonl`.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Bridge tracing spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}
