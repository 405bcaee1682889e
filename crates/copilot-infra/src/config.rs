//! Configuration loader for Challenge Copilot.
//!
//! Reads `config.toml` from the data directory (`~/.copilot/` by default) or
//! an explicit `--config` path and deserializes it into [`CopilotConfig`].
//! Falls back to defaults when the file is missing or malformed, then
//! applies `COPILOT_*` environment overrides.

use std::path::{Path, PathBuf};

use copilot_types::config::CopilotConfig;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "COPILOT_DATA_DIR";

const FEEDBACK_LOG_FILE: &str = "feedback.jsonl";

/// Errors raised while assembling the runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("credential not found: set the {var} environment variable")]
    MissingCredential { var: String },

    #[error("invalid value for {var}: '{value}'")]
    InvalidOverride { var: String, value: String },
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `COPILOT_DATA_DIR` environment variable
/// 2. `~/.copilot`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".copilot");
    }

    // Last resort: current directory
    PathBuf::from(".copilot")
}

/// Load configuration from `path`, or `{data_dir}/config.toml` if `None`.
///
/// - If the file does not exist, returns [`CopilotConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
///
/// Environment overrides are not applied here; see [`apply_env_overrides`].
pub async fn load_config_file(path: Option<&Path>, data_dir: &Path) -> CopilotConfig {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("config.toml"));

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return CopilotConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return CopilotConfig::default();
        }
    };

    match toml::from_str::<CopilotConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            CopilotConfig::default()
        }
    }
}

/// Apply `COPILOT_*` overrides using `lookup` to read variables.
///
/// Recognized: `COPILOT_MODEL`, `COPILOT_BASE_URL`,
/// `COPILOT_MAX_HISTORY_TURNS`, `COPILOT_FEEDBACK_LOG`. Empty values are
/// ignored.
pub fn apply_env_overrides<F>(mut config: CopilotConfig, lookup: F) -> Result<CopilotConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(model) = get("COPILOT_MODEL") {
        config.provider.model = model;
    }
    if let Some(base_url) = get("COPILOT_BASE_URL") {
        config.provider.base_url = base_url;
    }
    if let Some(turns) = get("COPILOT_MAX_HISTORY_TURNS") {
        config.conversation.max_history_turns =
            turns
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    var: "COPILOT_MAX_HISTORY_TURNS".to_string(),
                    value: turns.clone(),
                })?;
    }
    if let Some(path) = get("COPILOT_FEEDBACK_LOG") {
        config.feedback.log_path = Some(PathBuf::from(path));
    }

    Ok(config)
}

/// Load the file config and apply overrides from the process environment.
pub async fn load_config(path: Option<&Path>, data_dir: &Path) -> Result<CopilotConfig, ConfigError> {
    let config = load_config_file(path, data_dir).await;
    apply_env_overrides(config, |var| std::env::var(var).ok())
}

/// Where feedback entries are appended.
///
/// Unset means `{data_dir}/feedback.jsonl`; relative paths resolve against
/// `data_dir`.
pub fn feedback_log_path(config: &CopilotConfig, data_dir: &Path) -> PathBuf {
    match &config.feedback.log_path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => data_dir.join(path),
        None => data_dir.join(FEEDBACK_LOG_FILE),
    }
}
