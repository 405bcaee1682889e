//! Environment variable secret provider.
//!
//! The API key for the chat-completion endpoint is only ever read from the
//! process environment (including a `.env` file loaded at startup). Values
//! are wrapped in [`SecretString`] immediately so they never reach logs or
//! `Debug` output.

use secrecy::SecretString;

use crate::config::ConfigError;

/// Environment variable secret provider.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable name.
    ///
    /// Unset, empty, and non-Unicode values all count as absent.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            // Secrets must be valid strings; treat as not found.
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }

    /// Like [`get`](Self::get), but a missing credential is a configuration error.
    pub fn require(&self, key: &str) -> Result<SecretString, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingCredential {
            var: key.to_string(),
        })
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_env_provider_get_existing() {
        // SAFETY: The variable name is unique to this test and removed below.
        unsafe { std::env::set_var("COPILOT_TEST_SECRET_1", "gsk-test-123") };

        let provider = EnvSecretProvider::new();
        let secret = provider.get("COPILOT_TEST_SECRET_1").unwrap();
        assert_eq!(secret.expose_secret(), "gsk-test-123");

        // SAFETY: Same variable as above.
        unsafe { std::env::remove_var("COPILOT_TEST_SECRET_1") };
    }

    #[test]
    fn test_env_provider_get_missing() {
        let provider = EnvSecretProvider::new();
        assert!(provider.get("NONEXISTENT_VAR_XYZ_123").is_none());
    }

    #[test]
    fn test_env_provider_empty_value_is_missing() {
        // SAFETY: The variable name is unique to this test and removed below.
        unsafe { std::env::set_var("COPILOT_TEST_SECRET_EMPTY", "  ") };

        let provider = EnvSecretProvider::new();
        assert!(provider.get("COPILOT_TEST_SECRET_EMPTY").is_none());

        // SAFETY: Same variable as above.
        unsafe { std::env::remove_var("COPILOT_TEST_SECRET_EMPTY") };
    }

    #[test]
    fn test_require_missing_names_the_variable() {
        let provider = EnvSecretProvider::new();
        let err = provider.require("NONEXISTENT_VAR_XYZ_456").unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
        assert!(err.to_string().contains("NONEXISTENT_VAR_XYZ_456"));
    }
}
