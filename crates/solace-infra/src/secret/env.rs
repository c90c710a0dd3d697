//! Environment variable secret provider.
//!
//! Checks `key` directly as an env var name (e.g. "OPENAI_API_KEY").
//! Env vars override every other backend.

use solace_core::secret::provider::SecretProvider;
use solace_types::error::SecretError;

/// Read-only secret provider backed by the process environment.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &str {
        "environment"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Ok(Some(val)),
            Ok(_) | Err(std::env::VarError::NotPresent) => Ok(None),
            // Not valid Unicode: cannot be a usable secret.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }
}
