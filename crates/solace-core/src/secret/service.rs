//! Secret resolution service.
//!
//! SecretService resolves secrets through a chain of providers in priority
//! order. The chain is assembled in solace-infra; this service only knows
//! the `DynSecretProvider` abstraction.

use tracing::debug;

use solace_types::error::SecretError;

use super::provider::DynSecretProvider;

/// Resolves secrets across multiple storage backends.
///
/// Providers are ordered by precedence (first match wins).
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    /// Providers should be ordered by precedence (highest priority first).
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a secret value by iterating through providers in priority order.
    pub async fn get_secret(&self, key: &str) -> Result<Option<String>, SecretError> {
        for provider in &self.providers {
            if let Some(value) = provider.get_boxed(key).await? {
                debug!(key, provider = provider.name(), "secret resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Like [`get_secret`](Self::get_secret), but a missing secret is an error.
    pub async fn require_secret(&self, key: &str) -> Result<String, SecretError> {
        self.get_secret(key)
            .await?
            .ok_or_else(|| SecretError::NotFound(key.to_string()))
    }

    /// Names of the configured providers, highest priority first.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}
