//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `copilot-core`, and a factory ([`create_provider`])
//! that constructs it from [`ProviderSettings`].
//!
//! [`LlmProvider`]: copilot_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use copilot_core::llm::box_provider::BoxLlmProvider;
use copilot_types::config::ProviderSettings;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from [`ProviderSettings`] and a resolved key.
pub fn create_provider(settings: &ProviderSettings, api_key: SecretString) -> BoxLlmProvider {
    tracing::debug!(
        provider = %settings.name,
        base_url = %settings.base_url,
        model = %settings.model,
        "creating chat-completion provider"
    );
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: settings.name.clone(),
        base_url: settings.base_url.clone(),
        api_key,
        model: settings.model.clone(),
    });
    BoxLlmProvider::new(provider)
}
